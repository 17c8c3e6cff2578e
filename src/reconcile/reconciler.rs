use std::collections::{HashMap, HashSet};

use crate::reconcile::identity::{Identified, Merge};

/// Merge a freshly fetched snapshot into the currently displayed one.
///
/// Survivors keep the position they had in `previous` and take their field
/// values from `next`. Records only in `next` are appended in `next` order.
/// Records only in `previous` are dropped.
///
/// An absent `previous` is a first load: the result is `next` (or empty).
/// An absent `next` clears the list. Callers that can tell a failed fetch
/// apart from an empty one should skip the call instead of passing `None`.
pub fn reconcile<R>(previous: Option<&[R]>, next: Option<&[R]>) -> Vec<R>
where
    R: Identified + Merge + Clone,
{
    match (previous, next) {
        (None, next) => next.map(<[R]>::to_vec).unwrap_or_default(),
        (Some(_), None) => Vec::new(),
        (Some(previous), Some(next)) => merge_present(previous, next),
    }
}

fn merge_present<R>(previous: &[R], next: &[R]) -> Vec<R>
where
    R: Identified + Merge + Clone,
{
    let lookup = index_by_id(next);

    let mut merged: Vec<R> = previous
        .iter()
        .filter_map(|old| lookup.get(old.id()).map(|new| old.merged_with(new)))
        .collect();

    let previous_ids = id_set(previous);
    merged.extend(
        next.iter()
            .filter(|record| !previous_ids.contains(record.id()))
            .cloned(),
    );

    merged
}

/// Lookup from id to record. When an id repeats, the last occurrence wins.
pub(crate) fn index_by_id<R: Identified>(records: &[R]) -> HashMap<&R::Id, &R> {
    records.iter().map(|record| (record.id(), record)).collect()
}

pub(crate) fn id_set<R: Identified>(records: &[R]) -> HashSet<&R::Id> {
    records.iter().map(Identified::id).collect()
}
