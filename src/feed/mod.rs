pub mod error;
pub mod live_feed;
pub mod source;
