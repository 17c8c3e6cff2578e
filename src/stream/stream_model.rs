use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::reconcile::identity::{Identified, Merge};

/// A live or upcoming stream as served by the backend.
///
/// Accepts both the camelCase shape used by the app and the snake_case
/// column names of the `live_streams` table. Columns this model does not
/// name are kept in `extra` so a merge never loses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStream {
    /// Row id; numeric ids are read as their decimal text
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "is_live")]
    pub is_live: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "start_time")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "end_time")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewers: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "thumbnail_url")]
    pub thumbnail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "stream_url")]
    pub stream_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "replay_available")]
    pub replay_available: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn id_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

impl LiveStream {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            category: None,
            is_live: None,
            start_time: None,
            end_time: None,
            created_at: None,
            viewers: None,
            tags: None,
            thumbnail_url: None,
            stream_url: None,
            location: None,
            replay_available: None,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_live(mut self, is_live: bool) -> Self {
        self.is_live = Some(is_live);
        self
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn with_viewers(mut self, viewers: u64) -> Self {
        self.viewers = Some(viewers);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled stream")
    }

    pub fn viewer_count(&self) -> u64 {
        self.viewers.unwrap_or(0)
    }

    /// Flagged live, or already past its start time.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.is_live == Some(true) || self.start_time.is_some_and(|start| start <= now)
    }

    /// Not flagged live and scheduled to start after `now`.
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        self.is_live != Some(true) && self.start_time.is_some_and(|start| start > now)
    }
}

impl Identified for LiveStream {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

fn newer_or<T: Clone>(older: &Option<T>, newer: &Option<T>) -> Option<T> {
    newer.as_ref().or(older.as_ref()).cloned()
}

impl Merge for LiveStream {
    fn merged_with(&self, newer: &Self) -> Self {
        let mut extra = self.extra.clone();
        extra.extend(newer.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            id: newer.id.clone(),
            title: newer_or(&self.title, &newer.title),
            description: newer_or(&self.description, &newer.description),
            category: newer_or(&self.category, &newer.category),
            is_live: newer_or(&self.is_live, &newer.is_live),
            start_time: newer_or(&self.start_time, &newer.start_time),
            end_time: newer_or(&self.end_time, &newer.end_time),
            created_at: newer_or(&self.created_at, &newer.created_at),
            viewers: newer_or(&self.viewers, &newer.viewers),
            tags: newer_or(&self.tags, &newer.tags),
            thumbnail_url: newer_or(&self.thumbnail_url, &newer.thumbnail_url),
            stream_url: newer_or(&self.stream_url, &newer.stream_url),
            location: newer_or(&self.location, &newer.location),
            replay_available: newer_or(&self.replay_available, &newer.replay_available),
            extra,
        }
    }
}
