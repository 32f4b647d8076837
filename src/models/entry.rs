use super::time_block::TimeBlock;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One saved day of work for a single job.
///
/// Entries are never edited in place: a change is a delete followed by a new
/// entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,             // ⇔ entries.id (0 until stored)
    pub date: NaiveDate,     // ⇔ entries.date (TEXT "YYYY-MM-DD")
    pub job_id: String,      // ⇔ entries.job_id (not enforced)
    pub blocks: Vec<TimeBlock>, // ⇔ blocks rows, ordered by position
    #[serde(default)]
    pub notes: String,
}

impl Entry {
    pub fn new(date: NaiveDate, job_id: impl Into<String>, blocks: Vec<TimeBlock>) -> Self {
        Self {
            id: 0,
            date,
            job_id: job_id.into(),
            blocks,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Minutes of all valid blocks, before break/rounding adjustments.
    pub fn raw_minutes(&self) -> i64 {
        self.blocks
            .iter()
            .filter_map(TimeBlock::duration_minutes)
            .sum()
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Human-readable ISO week label, e.g. `2025-W36`.
pub fn week_label(date: NaiveDate) -> String {
    let w = date.iso_week();
    format!("{}-W{:02}", w.year(), w.week())
}
