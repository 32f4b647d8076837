//! Time utilities: parsing HH:MM, duration computations, formatting minutes, etc.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Minutes from `start` to `end`, wrapping past midnight when `end` is earlier.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let diff = minute_of_day(end) - minute_of_day(start);
    diff.rem_euclid(MINUTES_PER_DAY)
}

pub fn minute_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

pub fn format_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Parse an optional HH:MM value where an empty string means "not set".
pub fn parse_optional_time(input: &str) -> AppResult<Option<NaiveTime>> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
    Ok(Some(t))
}

/// Serde adapter storing `Option<NaiveTime>` as `"HH:MM"` (or `""` when unset).
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => NaiveTime::parse_from_str(v, "%H:%M")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
