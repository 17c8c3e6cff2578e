//! Live stream lists that refresh in place.
//!
//! The core is [`reconcile::reconciler::reconcile`], which folds each freshly
//! fetched snapshot into the list on screen without moving surviving rows.
//! Around it sit the Live TV view logic ([`stream`]), bookmarks
//! ([`library`]), the polling feed ([`feed`]) and a small CLI ([`cli`]).

pub mod cli;
pub mod feed;
pub mod library;
pub mod reconcile;
pub mod report;
pub mod stream;
pub mod trace;

pub use reconcile::{
    diff::{Reconciliation, reconcile_snapshot},
    identity::{Identified, Merge},
    reconciler::reconcile,
    record::{Record, RecordId, reconcile_values},
};
