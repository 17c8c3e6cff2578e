use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::{feed::error::FeedError, stream::stream_model::LiveStream};

/// Produces the current full snapshot of live streams.
pub trait StreamSource {
    fn fetch(&self) -> Result<Vec<LiveStream>, FeedError>;
}

impl<T: StreamSource + ?Sized> StreamSource for Box<T> {
    fn fetch(&self) -> Result<Vec<LiveStream>, FeedError> {
        (**self).fetch()
    }
}

impl<T: StreamSource + ?Sized> StreamSource for &T {
    fn fetch(&self) -> Result<Vec<LiveStream>, FeedError> {
        (**self).fetch()
    }
}

/// A backend answering `null` means no rows.
fn parse_snapshot(body: &str, context: &str) -> Result<Vec<LiveStream>, FeedError> {
    serde_json::from_str::<Option<Vec<LiveStream>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|source| FeedError::JsonParse {
            context: context.to_string(),
            source,
        })
}

// ============================================================================
// REST backend (PostgREST table endpoint)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RestSourceConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,

    /// Table holding the streams
    pub table: String,

    /// Anonymous API key sent as `apikey` and bearer token
    pub anon_key: Option<String>,

    pub timeout: Duration,
}

/// Reads active rows of the streams table over HTTP.
pub struct RestSource {
    client: reqwest::blocking::Client,
    endpoint: String,
    anon_key: Option<String>,
}

impl RestSource {
    pub fn new(config: &RestSourceConfig) -> Result<Self, FeedError> {
        let base = config.base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(FeedError::Config(format!(
                "backend url must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }
        if config.table.trim().is_empty() {
            return Err(FeedError::Config("table name is empty".into()));
        }

        let endpoint = format!("{}/rest/v1/{}", base, config.table);
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| FeedError::Http {
                url: endpoint.clone(),
                source,
            })?;

        Ok(Self {
            client,
            endpoint,
            anon_key: config.anon_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl StreamSource for RestSource {
    fn fetch(&self) -> Result<Vec<LiveStream>, FeedError> {
        let http_err = |source| FeedError::Http {
            url: self.endpoint.clone(),
            source,
        };

        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("select", "*"), ("is_active", "eq.true")]);
        if let Some(key) = &self.anon_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        debug!(url = %self.endpoint, "fetching live streams");
        let response = request.send().map_err(http_err)?;

        let status = response.status();
        let body = response.text().map_err(http_err)?;
        if !status.is_success() {
            return Err(FeedError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        parse_snapshot(&body, &self.endpoint)
    }
}

// ============================================================================
// JSON file snapshot
// ============================================================================

/// Reads a JSON array of streams from disk on every fetch.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StreamSource for FileSource {
    fn fetch(&self) -> Result<Vec<LiveStream>, FeedError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;

        parse_snapshot(&body, &self.path.display().to_string())
    }
}
