//! Time utilities: parsing "YYYY-MM-DD HH:MM" event times, converting them to
//! epoch milliseconds in the configured timezone, and back.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::OnceLock;

pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn event_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}$").expect("valid regex"))
}

/// Parse an event display time. Accepts a `T` separator as well as a space.
pub fn parse_event_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if !event_time_regex().is_match(s) {
        return None;
    }
    let normalized = s.replacen('T', " ", 1);
    NaiveDateTime::parse_from_str(&normalized, EVENT_TIME_FORMAT).ok()
}

pub fn format_event_time(dt: &NaiveDateTime) -> String {
    dt.format(EVENT_TIME_FORMAT).to_string()
}

/// Timezone used to turn wall-clock event times into timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Named(Tz),
}

impl Zone {
    /// "Local" (any case) or an IANA name such as "Asia/Shanghai".
    pub fn parse(name: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        name.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| AppError::InvalidTimezone(name.to_string()))
    }

    /// Epoch millis of a wall-clock time. Ambiguous times resolve to the
    /// earliest instant, non-existent ones (DST gaps) to `None`.
    pub fn timestamp_millis(&self, naive: &NaiveDateTime) -> Option<i64> {
        match self {
            Zone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.timestamp_millis()),
            Zone::Named(tz) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.timestamp_millis()),
        }
    }

    /// Wall-clock representation of an epoch-millis timestamp.
    pub fn naive_from_millis(&self, millis: i64) -> Option<NaiveDateTime> {
        let utc: DateTime<Utc> = DateTime::from_timestamp_millis(millis)?;
        Some(match self {
            Zone::Local => utc.with_timezone(&Local).naive_local(),
            Zone::Named(tz) => utc.with_timezone(tz).naive_local(),
        })
    }

    pub fn now_naive(&self) -> NaiveDateTime {
        let now = Utc::now();
        match self {
            Zone::Local => now.with_timezone(&Local).naive_local(),
            Zone::Named(tz) => now.with_timezone(tz).naive_local(),
        }
    }
}

/// Current time in epoch millis.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Validate a user supplied time and compute its timestamp.
pub fn resolve_event_time(input: &str, zone: &Zone) -> AppResult<(String, i64)> {
    let naive = parse_event_time(input).ok_or_else(|| AppError::InvalidTime(input.to_string()))?;
    let ts = zone
        .timestamp_millis(&naive)
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))?;
    Ok((format_event_time(&naive), ts))
}

/// Use `input` when given, the current wall-clock minute otherwise.
pub fn resolve_optional_event_time(input: Option<&str>, zone: &Zone) -> AppResult<(String, i64)> {
    match input {
        Some(s) if !s.trim().is_empty() => resolve_event_time(s, zone),
        _ => {
            let now = format_event_time(&zone.now_naive());
            resolve_event_time(&now, zone)
        }
    }
}
