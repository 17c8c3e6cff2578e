pub mod error;
pub mod saved;
pub mod store;
