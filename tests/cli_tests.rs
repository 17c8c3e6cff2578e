use std::time::Duration;

use clap::Parser;
use serde_json::json;
use stream_lineup::cli::commands::{build_source, merge_files, read_snapshot};
use stream_lineup::cli::config::{
    AppConfig, BackendConfig, Cli, Commands, PollConfig, build_rest_config, load_config,
    resolve_interval,
};
use stream_lineup::feed::source::StreamSource;
use stream_lineup::stream::lineup::SortOption;

use crate::common::fixtures::as_json;

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_merge() {
    let cli = Cli::parse_from(["stream-lineup", "merge", "--previous", "a.json", "--next", "b.json"]);
    match cli.command {
        Commands::Merge { previous, next } => {
            assert_eq!(previous.as_deref(), Some("a.json"));
            assert_eq!(next.as_deref(), Some("b.json"));
        }
        _ => panic!("Expected Merge command"),
    }
}

#[test]
fn cli_parse_lineup_defaults() {
    let cli = Cli::parse_from(["stream-lineup", "lineup"]);
    match cli.command {
        Commands::Lineup {
            source,
            category,
            sort,
        } => {
            assert!(source.is_none());
            assert_eq!(category, "All");
            assert_eq!(sort, SortOption::Popular);
        }
        _ => panic!("Expected Lineup command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_watch_all_args() {
    let cli = Cli::parse_from([
        "stream-lineup",
        "-vv",
        "watch",
        "--source",
        "streams.json",
        "--category",
        "Music",
        "--sort",
        "soon",
        "--interval",
        "5",
        "--cycles",
        "3",
        "--trace",
        "refresh.jsonl",
        "--library",
        "lib.json",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.library.as_deref(), Some("lib.json"));
    match cli.command {
        Commands::Watch {
            source,
            category,
            sort,
            interval,
            cycles,
            trace,
        } => {
            assert_eq!(source.as_deref(), Some("streams.json"));
            assert_eq!(category, "Music");
            assert_eq!(sort, SortOption::StartingSoon);
            assert_eq!(interval, Some(5));
            assert_eq!(cycles, Some(3));
            assert_eq!(trace.as_deref(), Some("refresh.jsonl"));
        }
        _ => panic!("Expected Watch command"),
    }
}

#[test]
fn cli_rejects_unknown_sort() {
    assert!(Cli::try_parse_from(["stream-lineup", "lineup", "--sort", "random"]).is_err());
}

#[test]
fn cli_parse_save_commands() {
    let cli = Cli::parse_from(["stream-lineup", "save", "live-001"]);
    assert!(matches!(cli.command, Commands::Save { ref id } if id == "live-001"));

    let cli = Cli::parse_from(["stream-lineup", "unsave", "live-001"]);
    assert!(matches!(cli.command, Commands::Unsave { ref id } if id == "live-001"));

    let cli = Cli::parse_from(["stream-lineup", "saved"]);
    assert!(matches!(cli.command, Commands::Saved));
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_missing_file_uses_defaults() {
    let config = load_config(Some("/nonexistent/stream-lineup.yaml"));
    assert!(config.backend.url.is_none());
    assert_eq!(config.backend.table, "live_streams");
    assert_eq!(config.backend.timeout_secs, 10);
    assert_eq!(config.poll.interval_secs, 30);
    assert_eq!(config.library.path, "saved_library.json");
    assert!(config.trace.path.is_none());
}

#[test]
fn config_partial_yaml_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream-lineup.yaml");
    std::fs::write(
        &path,
        "backend:\n  url: https://demo.supabase.co\n  anon_key: k\npoll:\n  interval_secs: 10\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.backend.url.as_deref(), Some("https://demo.supabase.co"));
    assert_eq!(config.backend.anon_key.as_deref(), Some("k"));
    assert_eq!(config.backend.table, "live_streams");
    assert_eq!(config.poll.interval_secs, 10);
    assert_eq!(config.library.path, "saved_library.json");
}

#[test]
fn config_malformed_yaml_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "poll: [this is: not valid").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.poll.interval_secs, 30);
}

#[test]
fn rest_config_cli_url_beats_config() {
    let backend = BackendConfig {
        url: Some("https://from-config.example".into()),
        anon_key: Some("key".into()),
        ..BackendConfig::default()
    };

    let rest = build_rest_config(Some("https://from-cli.example"), &backend).unwrap();
    assert_eq!(rest.base_url, "https://from-cli.example");
    assert_eq!(rest.anon_key.as_deref(), Some("key"));
    assert_eq!(rest.table, "live_streams");
    assert_eq!(rest.timeout, Duration::from_secs(10));

    let rest = build_rest_config(None, &backend).unwrap();
    assert_eq!(rest.base_url, "https://from-config.example");
}

#[test]
fn interval_cli_beats_config_and_is_at_least_one_second() {
    let poll = PollConfig { interval_secs: 45 };
    assert_eq!(resolve_interval(None, &poll), Duration::from_secs(45));
    assert_eq!(resolve_interval(Some(5), &poll), Duration::from_secs(5));
    assert_eq!(resolve_interval(Some(0), &poll), Duration::from_secs(1));
}

#[test]
fn build_source_treats_paths_as_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("streams.json");
    std::fs::write(&path, r#"[{"id": "a"}]"#).unwrap();

    let source = build_source(path.to_str(), &AppConfig::default()).unwrap();
    assert_eq!(source.fetch().unwrap().len(), 1);
}

#[test]
fn build_source_accepts_explicit_url() {
    assert!(build_source(Some("https://demo.supabase.co"), &AppConfig::default()).is_ok());
}

// ============================================================================
// merge subcommand
// ============================================================================

#[test]
fn merge_files_reconciles_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let prev = dir.path().join("prev.json");
    let next = dir.path().join("next.json");
    std::fs::write(&prev, r#"[{"id":"a","title":"A","viewers":1},{"id":"b","title":"B"}]"#).unwrap();
    std::fs::write(&next, r#"[{"id":"c","title":"C"},{"id":"a","viewers":3}]"#).unwrap();

    let merged = merge_files(prev.to_str(), next.to_str()).unwrap();
    assert_eq!(
        as_json(&merged),
        json!([{"id": "a", "title": "A", "viewers": 3}, {"id": "c", "title": "C"}])
    );
}

#[test]
fn merge_files_missing_previous_is_first_load() {
    let dir = tempfile::tempdir().unwrap();
    let next = dir.path().join("next.json");
    std::fs::write(&next, r#"[{"id":1}]"#).unwrap();

    let missing = dir.path().join("missing.json");
    let merged = merge_files(missing.to_str(), next.to_str()).unwrap();
    assert_eq!(as_json(&merged), json!([{"id": 1}]));

    assert!(merge_files(next.to_str(), None).unwrap().is_empty());
}

#[test]
fn read_snapshot_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{").unwrap();

    assert!(read_snapshot(path.to_str()).is_err());
    assert!(read_snapshot(None).unwrap().is_none());
}
