use crate::reconcile::{
    identity::{Identified, Merge},
    reconciler::{id_set, index_by_id},
};

/// Result of merging two present snapshots, with the identity-level changes
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation<R: Identified> {
    /// The merged collection, as `reconcile` would return it
    pub records: Vec<R>,

    /// Ids only in the new snapshot, in append order
    pub added: Vec<R::Id>,

    /// Ids only in the old snapshot, in old order
    pub removed: Vec<R::Id>,

    /// Survivors whose merged value differs from the old value
    pub updated: Vec<R::Id>,

    /// Number of survivors (updated or not)
    pub retained: usize,
}

impl<R: Identified> Reconciliation<R> {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

pub fn reconcile_snapshot<R>(previous: &[R], next: &[R]) -> Reconciliation<R>
where
    R: Identified + Merge + Clone + PartialEq,
{
    let lookup = index_by_id(next);
    let previous_ids = id_set(previous);

    let mut records = Vec::with_capacity(next.len());
    let mut removed = vec![];
    let mut updated = vec![];
    let mut retained = 0;

    for old in previous {
        match lookup.get(old.id()) {
            Some(new) => {
                let merged = old.merged_with(new);
                if merged != *old {
                    updated.push(old.id().clone());
                }
                retained += 1;
                records.push(merged);
            }
            None => removed.push(old.id().clone()),
        }
    }

    let mut added = vec![];
    for new in next {
        if !previous_ids.contains(new.id()) {
            added.push(new.id().clone());
            records.push(new.clone());
        }
    }

    Reconciliation {
        records,
        added,
        removed,
        updated,
        retained,
    }
}
