pub mod diff;
pub mod identity;
pub mod reconciler;
pub mod record;
