use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::stream::{
    countdown::countdown,
    lineup::{Lineup, highlight_tags, progress},
    stream_model::LiveStream,
};

// ============================================================================
// Console reporter — Live Now / Upcoming sections
// ============================================================================

/// Format a lineup for terminal output.
///
/// Produces output like:
/// ```text
/// === Live TV: 1 stream live now ===
///
/// -- Live Now --
/// ● Skyfall Finals [Sports] 1200 viewers 45% [Finals] ★
///
/// -- Upcoming --
/// ◷ Speedriding Open [Competitions] starts in 02:31:09
/// ```
///
/// `saved` marks bookmarked ids with a star; ids missing from it are unsaved.
pub fn format_lineup(lineup: &Lineup, now: DateTime<Utc>, saved: &HashMap<String, bool>) -> String {
    let mut out = String::new();

    let live = lineup.live_now.len();
    out.push_str(&format!(
        "=== Live TV: {} {} live now ===\n\n",
        live,
        if live == 1 { "stream" } else { "streams" }
    ));

    out.push_str("-- Live Now --\n");
    if lineup.live_now.is_empty() {
        out.push_str("  No live streams right now\n");
        out.push_str("  Check back later for live events\n");
    }
    for stream in &lineup.live_now {
        out.push_str(&format!("\u{25cf} {}", describe(stream)));
        out.push_str(&format!(" {} viewers", stream.viewer_count()));
        if let Some(p) = progress(stream, now) {
            out.push_str(&format!(" {:.0}%", p * 100.0));
        }
        finish_line(&mut out, stream, saved);
    }

    out.push_str("\n-- Upcoming --\n");
    if lineup.upcoming.is_empty() {
        out.push_str("  No upcoming streams\n");
    }
    for stream in &lineup.upcoming {
        out.push_str(&format!("\u{25f7} {}", describe(stream)));
        if let Some(start) = stream.start_time {
            out.push_str(&format!(" starts in {}", countdown(start, now)));
        }
        finish_line(&mut out, stream, saved);
    }

    out
}

fn describe(stream: &LiveStream) -> String {
    match &stream.category {
        Some(category) => format!("{} [{}]", stream.display_title(), category),
        None => stream.display_title().to_string(),
    }
}

fn finish_line(out: &mut String, stream: &LiveStream, saved: &HashMap<String, bool>) {
    for tag in highlight_tags(stream) {
        out.push_str(&format!(" [{}]", tag));
    }
    if saved.get(&stream.id).copied().unwrap_or(false) {
        out.push_str(" \u{2605}");
    }
    out.push('\n');
}
