use std::collections::HashMap;

use stream_lineup::report::console::format_lineup;
use stream_lineup::stream::lineup::{Lineup, SortOption, build_lineup};

use crate::common::fixtures::{at, stream};

mod common;

#[test]
fn empty_lineup_shows_empty_states() {
    let out = format_lineup(&Lineup::default(), at(12, 0, 0), &HashMap::new());

    assert!(out.starts_with("=== Live TV: 0 streams live now ==="));
    assert!(out.contains("No live streams right now"));
    assert!(out.contains("Check back later for live events"));
    assert!(out.contains("No upcoming streams"));
}

#[test]
fn live_and_upcoming_entries_render_details() {
    let streams = vec![
        stream("finals")
            .with_category("Sports")
            .with_live(true)
            .with_viewers(1200)
            .with_start(at(11, 0, 0))
            .with_end(at(13, 0, 0))
            .with_tags(["Finals", "HD"]),
        stream("podcast").with_start(at(14, 30, 5)),
    ];
    let lineup = build_lineup(&streams, "All", SortOption::Popular, at(12, 0, 0));
    let saved = HashMap::from([("finals".to_string(), true), ("podcast".to_string(), false)]);

    let out = format_lineup(&lineup, at(12, 0, 0), &saved);

    assert!(out.starts_with("=== Live TV: 1 stream live now ==="));
    assert!(
        out.contains("\u{25cf} FINALS [Sports] 1200 viewers 50% [Finals] \u{2605}\n"),
        "live line was: {}",
        out
    );
    assert!(!out.contains("[HD]"), "only highlight tags become badges");
    assert!(out.contains("\u{25f7} PODCAST starts in 02:30:05\n"), "upcoming line was: {}", out);
}
