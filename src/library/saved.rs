use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::library::{error::LibraryError, store::KeyValueStore};

/// Storage key holding the saved list.
pub const SAVED_LIBRARY_KEY: &str = "saved_library";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Bookmarks ("Save to Library") kept as one JSON list in a key-value store.
pub struct SavedLibrary<S: KeyValueStore> {
    store: S,
    // Held across every read-modify-write of the saved list.
    update_lock: Mutex<()>,
}

impl<S: KeyValueStore> SavedLibrary<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            update_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved items in save order. Missing or unreadable data is an empty list.
    pub fn items(&self) -> Result<Vec<SavedItem>, LibraryError> {
        let Some(raw) = self.store.get(SAVED_LIBRARY_KEY)? else {
            return Ok(vec![]);
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "saved library is malformed, treating as empty");
                Ok(vec![])
            }
        }
    }

    pub fn is_saved(&self, id: &str) -> Result<bool, LibraryError> {
        Ok(self.items()?.iter().any(|item| item.id == id))
    }

    /// Save or unsave `id`. Saving twice keeps the original timestamp.
    pub fn set_saved(&self, id: &str, save: bool) -> Result<(), LibraryError> {
        self.set_saved_at(id, save, Utc::now())
    }

    pub fn set_saved_at(&self, id: &str, save: bool, now: DateTime<Utc>) -> Result<(), LibraryError> {
        self.update(id, |_| save, now).map(|_| ())
    }

    /// Flip the saved state of `id` and return the new state.
    pub fn toggle(&self, id: &str) -> Result<bool, LibraryError> {
        self.update(id, |saved| !saved, Utc::now())
    }

    fn update<F>(&self, id: &str, decide: F, now: DateTime<Utc>) -> Result<bool, LibraryError>
    where
        F: FnOnce(bool) -> bool,
    {
        let _guard = self.update_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut items = self.items()?;
        let position = items.iter().position(|item| item.id == id);
        let save = decide(position.is_some());

        match (save, position) {
            (true, None) => items.push(SavedItem {
                id: id.to_string(),
                created_at: now,
            }),
            (false, Some(idx)) => {
                items.remove(idx);
            }
            _ => {}
        }

        debug!(id, save, total = items.len(), "updating saved library");

        let json = serde_json::to_string(&items).map_err(|source| LibraryError::JsonSerialize {
            context: SAVED_LIBRARY_KEY.to_string(),
            source,
        })?;
        self.store.set(SAVED_LIBRARY_KEY, json)?;
        Ok(save)
    }

    /// Saved state for each id, as the list view needs it.
    pub fn saved_map<'a, I>(&self, ids: I) -> Result<HashMap<String, bool>, LibraryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let items = self.items()?;
        Ok(ids
            .into_iter()
            .map(|id| (id.to_string(), items.iter().any(|item| item.id == id)))
            .collect())
    }
}
