use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stream::stream_model::LiveStream;

/// Category chip that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Category chips offered by the Live TV screen.
pub const CATEGORIES: [&str; 6] = [
    ALL_CATEGORIES,
    "Sports",
    "Festivals",
    "Podcasts",
    "Competitions",
    "Music",
];

/// Tags rendered as badges on a stream card.
pub const HIGHLIGHT_TAGS: [&str; 3] = ["Finals", "Exclusive", "Breaking"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Most viewers first
    #[default]
    Popular,
    /// Latest start (or creation) first
    Newest,
    /// Earliest start first, unscheduled last
    #[serde(alias = "soon")]
    StartingSoon,
}

impl SortOption {
    pub fn label(self) -> &'static str {
        match self {
            SortOption::Popular => "Most Popular",
            SortOption::Newest => "Newest",
            SortOption::StartingSoon => "Starting Soon",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "popular" => Ok(SortOption::Popular),
            "newest" => Ok(SortOption::Newest),
            "soon" | "starting_soon" | "starting-soon" => Ok(SortOption::StartingSoon),
            other => Err(format!(
                "unknown sort option '{}' (expected popular, newest or soon)",
                other
            )),
        }
    }
}

/// The two sections of the Live TV list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lineup {
    pub live_now: Vec<LiveStream>,
    pub upcoming: Vec<LiveStream>,
}

impl Lineup {
    pub fn is_empty(&self) -> bool {
        self.live_now.is_empty() && self.upcoming.is_empty()
    }
}

pub fn filter_by_category(streams: &[LiveStream], category: &str) -> Vec<LiveStream> {
    if category == ALL_CATEGORIES {
        return streams.to_vec();
    }

    streams
        .iter()
        .filter(|s| s.category.as_deref() == Some(category))
        .cloned()
        .collect()
}

/// Stable sort in place.
pub fn sort_streams(streams: &mut [LiveStream], option: SortOption) {
    match option {
        SortOption::Popular => {
            streams.sort_by(|a, b| b.viewer_count().cmp(&a.viewer_count()));
        }
        SortOption::Newest => {
            let key = |s: &LiveStream| {
                s.start_time
                    .or(s.created_at)
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
            };
            streams.sort_by(|a, b| key(b).cmp(&key(a)));
        }
        SortOption::StartingSoon => {
            streams.sort_by_key(|s| (s.start_time.is_none(), s.start_time));
        }
    }
}

/// Split into live and upcoming. A stream with no start time that is not
/// flagged live lands in neither section.
pub fn split_lineup(streams: &[LiveStream], now: DateTime<Utc>) -> Lineup {
    let (live_now, rest): (Vec<_>, Vec<_>) =
        streams.iter().cloned().partition(|s| s.is_live_at(now));

    let upcoming = rest.into_iter().filter(|s| s.is_upcoming_at(now)).collect();

    Lineup { live_now, upcoming }
}

/// Filter, sort, then split.
pub fn build_lineup(
    streams: &[LiveStream],
    category: &str,
    sort: SortOption,
    now: DateTime<Utc>,
) -> Lineup {
    let mut visible = filter_by_category(streams, category);
    sort_streams(&mut visible, sort);
    split_lineup(&visible, now)
}

/// Fraction of the scheduled window already elapsed, in `[0, 1]`.
pub fn progress(stream: &LiveStream, now: DateTime<Utc>) -> Option<f64> {
    let (start, end) = (stream.start_time?, stream.end_time?);

    let total = (end - start).num_milliseconds();
    if total <= 0 {
        return None;
    }

    let current = (now - start).num_milliseconds().clamp(0, total);
    Some(current as f64 / total as f64)
}

pub fn highlight_tags(stream: &LiveStream) -> Vec<&str> {
    stream
        .tags
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|tag| HIGHLIGHT_TAGS.contains(tag))
        .collect()
}
