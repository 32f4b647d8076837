use crate::errors::{AppError, AppResult};
use crate::utils::time::{self, hhmm_opt};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A start/end pair of wall-clock times with no date attached.
///
/// Both ends may be missing while a day is being edited. Such blocks are
/// stored as-is but never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeBlock {
    #[serde(with = "hhmm_opt", default)]
    pub start: Option<NaiveTime>,
    #[serde(with = "hhmm_opt", default)]
    pub end: Option<NaiveTime>,
}

impl TimeBlock {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Worked minutes, or `None` when the block does not count.
    ///
    /// An end earlier than the start crosses midnight. Equal ends are invalid.
    pub fn duration_minutes(&self) -> Option<i64> {
        let (start, end) = (self.start?, self.end?);
        let mins = time::minutes_between(start, end);
        (mins > 0).then_some(mins)
    }

    pub fn is_valid(&self) -> bool {
        self.duration_minutes().is_some()
    }

    /// Parse `HH:MM-HH:MM`. Either side may be left empty (`09:00-`).
    pub fn parse(s: &str) -> AppResult<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| AppError::InvalidBlock(format!("'{}' (expected HH:MM-HH:MM)", s)))?;

        Ok(Self {
            start: time::parse_optional_time(start)?,
            end: time::parse_optional_time(end)?,
        })
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            time::format_time(self.start),
            time::format_time(self.end)
        )
    }
}
