use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum FeedError {
    /// HTTP request could not be built, sent, or read
    Http { url: String, source: reqwest::Error },

    /// Backend answered with a non-success status
    Status { url: String, status: u16, body: String },

    /// Snapshot file could not be read
    Io { path: PathBuf, source: std::io::Error },

    /// Response or file was not a list of streams
    JsonParse { context: String, source: serde_json::Error },

    /// Source settings are unusable
    Config(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http { url, source } => {
                write!(f, "Request to {} failed: {}", url, source)
            }
            FeedError::Status { url, status, body } => {
                write!(f, "{} returned HTTP {}: {}", url, status, body)
            }
            FeedError::Io { path, source } => {
                write!(f, "Could not read {}: {}", path.display(), source)
            }
            FeedError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            FeedError::Config(msg) => {
                write!(f, "Invalid source configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Http { source, .. } => Some(source),
            FeedError::Io { source, .. } => Some(source),
            FeedError::JsonParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
