use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use stream_lineup::reconcile::record::{Record, parse_collection};
use stream_lineup::stream::stream_model::LiveStream;

/// 2025-12-01 at the given UTC time.
pub fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, h, m, s).unwrap()
}

pub fn records(value: Value) -> Vec<Record> {
    parse_collection(&value).expect("fixture must be an array of objects")
}

pub fn as_json(records: &[Record]) -> Value {
    serde_json::to_value(records).unwrap()
}

pub fn stream(id: &str) -> LiveStream {
    LiveStream::new(id).with_title(id.to_uppercase())
}

pub fn ids(streams: &[LiveStream]) -> Vec<&str> {
    streams.iter().map(|s| s.id.as_str()).collect()
}
