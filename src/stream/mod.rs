pub mod countdown;
pub mod lineup;
pub mod stream_model;
