use chrono::{DateTime, Local, NaiveDateTime};

/// Format used for reading timestamps, e.g. `2024-03-01 14:05:09.123456`
const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn now_local() -> String {
    format_local(&Local::now())
}

fn format_local(ts: &DateTime<Local>) -> String {
    ts.format(LOCAL_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_local(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()
}
