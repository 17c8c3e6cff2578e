use std::hash::Hash;

/// A value that carries a stable identity within a snapshot.
pub trait Identified {
    type Id: Eq + Hash + Clone + std::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Shallow merge with newer-priority.
///
/// Every field present in `newer` wins; fields that only `self` carries are
/// kept. The identity of the result is the shared identity of both sides.
pub trait Merge {
    fn merged_with(&self, newer: &Self) -> Self;
}
