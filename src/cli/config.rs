use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::feed::{error::FeedError, source::RestSourceConfig};
use crate::stream::lineup::{ALL_CATEGORIES, SortOption};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "stream-lineup",
    version,
    about = "Live stream list that refreshes in place"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: stream-lineup.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Saved library file (overrides config)
    #[arg(long, global = true)]
    pub library: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile two JSON snapshots and print the merged list
    Merge {
        /// Currently displayed list (absent if omitted or missing)
        #[arg(long)]
        previous: Option<String>,

        /// Freshly fetched list (absent if omitted or missing)
        #[arg(long)]
        next: Option<String>,
    },

    /// Fetch once and print the Live Now / Upcoming sections
    Lineup {
        /// Backend URL or JSON snapshot file (default: backend from config)
        #[arg(long)]
        source: Option<String>,

        /// Category filter
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Sort order: popular, newest, soon
        #[arg(long, default_value = "popular")]
        sort: SortOption,
    },

    /// Poll the source and reprint the lineup after every refresh
    Watch {
        /// Backend URL or JSON snapshot file (default: backend from config)
        #[arg(long)]
        source: Option<String>,

        /// Category filter
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Sort order: popular, newest, soon
        #[arg(long, default_value = "popular")]
        sort: SortOption,

        /// Seconds between refreshes (overrides config)
        #[arg(long)]
        interval: Option<u64>,

        /// Stop after this many refreshes
        #[arg(long)]
        cycles: Option<u64>,

        /// JSONL file receiving one event per refresh (overrides config)
        #[arg(long)]
        trace: Option<String>,
    },

    /// Add a stream to the saved library
    Save { id: String },

    /// Remove a stream from the saved library
    Unsave { id: String },

    /// List saved streams
    Saved,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `stream-lineup.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,

    pub anon_key: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_library_path")]
    pub path: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_library_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_table() -> String { "live_streams".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_interval_secs() -> u64 { 30 }
fn default_library_path() -> String { "saved_library.json".to_string() }

/// Environment fallbacks for backend settings.
pub const ENV_BACKEND_URL: &str = "STREAM_LINEUP_URL";
pub const ENV_ANON_KEY: &str = "STREAM_LINEUP_ANON_KEY";

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("stream-lineup.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve backend settings: CLI > config > env.
pub fn build_rest_config(
    url_override: Option<&str>,
    backend: &BackendConfig,
) -> Result<RestSourceConfig, FeedError> {
    let base_url = url_override
        .map(str::to_string)
        .or_else(|| backend.url.clone())
        .or_else(|| std::env::var(ENV_BACKEND_URL).ok())
        .ok_or_else(|| {
            FeedError::Config(format!(
                "no backend url: pass --source, set backend.url or {}",
                ENV_BACKEND_URL
            ))
        })?;

    let anon_key = backend
        .anon_key
        .clone()
        .or_else(|| std::env::var(ENV_ANON_KEY).ok());

    Ok(RestSourceConfig {
        base_url,
        table: backend.table.clone(),
        anon_key,
        timeout: Duration::from_secs(backend.timeout_secs),
    })
}

/// Poll period: CLI > config. Zero is raised to one second.
pub fn resolve_interval(cli_secs: Option<u64>, poll: &PollConfig) -> Duration {
    Duration::from_secs(cli_secs.unwrap_or(poll.interval_secs).max(1))
}
