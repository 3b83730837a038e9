use chrono::{DateTime, NaiveDate, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const STAMP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn format_timestamp(stamp: DateTime<Utc>) -> String {
    stamp.format(TimeUtils::STAMP_TIME_FORMAT).to_string()
}

pub fn utc_now_as_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    // How many seconds ago was the event described by `past_timestamp_ms` ?
    (utc_now_as_timestamp_ms() - past_timestamp_ms) / TimeUtils::MS_IN_S
}

/// `count` consecutive calendar days starting at `first`
pub fn daily_dates(first: NaiveDate, count: usize) -> Vec<NaiveDate> {
    first.iter_days().take(count).collect()
}
