use std::ops::ControlFlow;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::cli::config::{AppConfig, build_rest_config};
use crate::feed::{
    live_feed::{LiveFeed, RefreshOutcome},
    source::{FileSource, RestSource, StreamSource},
};
use crate::library::{saved::SavedLibrary, store::FileStore};
use crate::reconcile::record::{Record, reconcile_values};
use crate::report::console::format_lineup;
use crate::stream::{
    lineup::{SortOption, build_lineup},
    stream_model::LiveStream,
};
use crate::trace::logger::TraceLogger;

// ============================================================================
// merge subcommand
// ============================================================================

/// Read a snapshot file. A missing path or file is an absent snapshot.
pub fn read_snapshot(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !Path::new(path).exists() {
        info!(path, "snapshot file not found, treating as absent");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn merge_files(
    previous: Option<&str>,
    next: Option<&str>,
) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let previous = read_snapshot(previous)?;
    let next = read_snapshot(next)?;
    Ok(reconcile_values(previous.as_ref(), next.as_ref()))
}

pub fn cmd_merge(previous: Option<&str>, next: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let merged = merge_files(previous, next)?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

// ============================================================================
// lineup / watch subcommands
// ============================================================================

/// Pick the stream source: an http(s) URL is a backend, anything else is a
/// snapshot file, and no argument means the configured backend.
pub fn build_source(
    source: Option<&str>,
    config: &AppConfig,
) -> Result<Box<dyn StreamSource + Send + Sync>, Box<dyn std::error::Error>> {
    match source {
        Some(s) if !(s.starts_with("http://") || s.starts_with("https://")) => {
            Ok(Box::new(FileSource::new(s)))
        }
        url => {
            let rest = build_rest_config(url, &config.backend)?;
            Ok(Box::new(RestSource::new(&rest)?))
        }
    }
}

fn open_library(library_path: &str) -> SavedLibrary<FileStore> {
    SavedLibrary::new(FileStore::new(library_path))
}

fn render(
    streams: &[LiveStream],
    category: &str,
    sort: SortOption,
    library: &SavedLibrary<FileStore>,
) -> Result<String, Box<dyn std::error::Error>> {
    let now = Utc::now();
    let lineup = build_lineup(streams, category, sort, now);
    let saved = library.saved_map(streams.iter().map(|s| s.id.as_str()))?;
    Ok(format_lineup(&lineup, now, &saved))
}

pub fn cmd_lineup(
    source: Option<&str>,
    category: &str,
    sort: SortOption,
    library_path: &str,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let feed = LiveFeed::new(build_source(source, config)?);
    feed.refresh()?;

    let library = open_library(library_path);
    print!("{}", render(&feed.streams(), category, sort, &library)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_watch(
    source: Option<&str>,
    category: &str,
    sort: SortOption,
    interval: Duration,
    cycles: Option<u64>,
    trace_path: Option<&str>,
    library_path: &str,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let feed = LiveFeed::new(build_source(source, config)?).with_tracer(tracer);
    let library = open_library(library_path);
    let stop = AtomicBool::new(false);

    info!(interval_secs = interval.as_secs(), sort = sort.label(), category, "watching live streams");

    let mut seen = 0;
    feed.poll(interval, &stop, |feed, result| {
        seen += 1;

        match result {
            Ok(RefreshOutcome::Applied(summary)) if summary.changed() || summary.cycle == 1 => {
                match render(&feed.streams(), category, sort, &library) {
                    Ok(text) => println!("{}", text),
                    Err(e) => eprintln!("Could not render lineup: {}", e),
                }
            }
            Ok(_) => {}
            Err(e) => eprintln!("Refresh failed, showing previous list: {}", e),
        }

        match cycles {
            Some(limit) if seen >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    });

    Ok(())
}

// ============================================================================
// saved library subcommands
// ============================================================================

pub fn cmd_save(library_path: &str, id: &str, save: bool) -> Result<(), Box<dyn std::error::Error>> {
    let library = open_library(library_path);
    library.set_saved(id, save)?;
    println!("{} {}", if save { "Saved" } else { "Removed" }, id);
    Ok(())
}

pub fn cmd_saved(library_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let items = open_library(library_path).items()?;

    if items.is_empty() {
        println!("Library is empty");
        return Ok(());
    }

    for item in &items {
        println!("{}  (saved {})", item.id, item.created_at.to_rfc3339());
    }
    Ok(())
}
