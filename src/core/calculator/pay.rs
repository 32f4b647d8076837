//! Weekly pay allocation.
//!
//! Every valid block of every entry is flattened into one list, grouped by
//! ISO week (Monday start) and ordered by date and start time. Inside a week,
//! the minutes above the overtime threshold are charged at the overtime
//! multiplier, starting from the most recent block and walking backwards.
//! The per-block split is then folded back into per-entry totals.
//!
//! The allocation is a pure function of its inputs: malformed blocks are
//! skipped, orphaned job references pay nothing, and nothing ever fails.

use crate::models::entry::{Entry, week_start};
use crate::models::job::Job;
use crate::models::settings::PaySettings;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

/// Resolves a job identifier to its hourly rate.
pub trait RateLookup {
    fn rate(&self, job_id: &str) -> Option<f64>;
}

impl RateLookup for HashMap<String, f64> {
    fn rate(&self, job_id: &str) -> Option<f64> {
        self.get(job_id).copied()
    }
}

impl RateLookup for [Job] {
    fn rate(&self, job_id: &str) -> Option<f64> {
        self.iter().find(|j| j.id == job_id).map(|j| j.rate)
    }
}

impl RateLookup for Vec<Job> {
    fn rate(&self, job_id: &str) -> Option<f64> {
        self.as_slice().rate(job_id)
    }
}

/// A single counted block, tagged with everything the allocation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatBlock {
    /// Index of the owning entry in the input slice.
    pub entry: usize,
    pub week: NaiveDate,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub minutes: i64,
    pub rate: f64,
    pub overtime_minutes: i64,
}

impl FlatBlock {
    pub fn regular_minutes(&self) -> i64 {
        self.minutes - self.overtime_minutes
    }

    pub fn regular_pay(&self) -> f64 {
        self.regular_minutes() as f64 / 60.0 * self.rate
    }

    pub fn overtime_pay(&self, multiplier: f64) -> f64 {
        self.overtime_minutes as f64 / 60.0 * self.rate * multiplier
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPay {
    pub entry_id: i64,
    pub minutes: i64,
    pub overtime_minutes: i64,
    pub pay: f64,
}

impl EntryPay {
    pub fn hours(&self) -> f64 {
        self.minutes as f64 / 60.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub minutes: i64,
    pub overtime_minutes: i64,
    pub regular_pay: f64,
    pub overtime_pay: f64,
}

impl WeekSummary {
    fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            minutes: 0,
            overtime_minutes: 0,
            regular_pay: 0.0,
            overtime_pay: 0.0,
        }
    }

    pub fn hours(&self) -> f64 {
        self.minutes as f64 / 60.0
    }

    pub fn pay(&self) -> f64 {
        self.regular_pay + self.overtime_pay
    }
}

/// Result of [`allocate`]: one [`EntryPay`] per input entry, in input order,
/// plus one [`WeekSummary`] per week that has counted time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayReport {
    pub entries: Vec<EntryPay>,
    pub weeks: Vec<WeekSummary>,
}

impl PayReport {
    pub fn total_minutes(&self) -> i64 {
        self.entries.iter().map(|e| e.minutes).sum()
    }

    pub fn total_pay(&self) -> f64 {
        self.entries.iter().map(|e| e.pay).sum()
    }

    pub fn for_entry(&self, entry_id: i64) -> Option<&EntryPay> {
        self.entries.iter().find(|e| e.entry_id == entry_id)
    }
}

/// Compute hours and pay for every entry.
pub fn allocate<R>(entries: &[Entry], rates: &R, settings: &PaySettings) -> PayReport
where
    R: RateLookup + ?Sized,
{
    let mut blocks = flatten(entries, rates, settings);

    let mut report = PayReport {
        entries: entries
            .iter()
            .map(|e| EntryPay {
                entry_id: e.id,
                ..Default::default()
            })
            .collect(),
        weeks: Vec::new(),
    };

    for week in blocks.chunk_by_mut(|a, b| a.week == b.week) {
        allocate_overtime(week, settings);

        let mut summary = WeekSummary::new(week[0].week);
        for b in week.iter() {
            let regular = b.regular_pay();
            let overtime = b.overtime_pay(settings.overtime_multiplier);

            summary.minutes += b.minutes;
            summary.overtime_minutes += b.overtime_minutes;
            summary.regular_pay += regular;
            summary.overtime_pay += overtime;

            let owner = &mut report.entries[b.entry];
            owner.minutes += b.minutes;
            owner.overtime_minutes += b.overtime_minutes;
            owner.pay += regular + overtime;
        }
        report.weeks.push(summary);
    }

    report
}

/// Flatten the valid blocks of `entries`, sorted by week, date and start time.
///
/// The sort is stable, so blocks with identical keys keep input order.
pub fn flatten<R>(entries: &[Entry], rates: &R, settings: &PaySettings) -> Vec<FlatBlock>
where
    R: RateLookup + ?Sized,
{
    let mut out = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        let rate = rates.rate(&entry.job_id).unwrap_or(0.0);

        let mut counted: Vec<(NaiveTime, i64)> = entry
            .blocks
            .iter()
            .filter_map(|b| Some((b.start?, b.duration_minutes()?)))
            .collect();
        // adjustments land on the latest blocks of the day, not the last typed
        counted.sort_by_key(|(start, _)| *start);

        let mut minutes: Vec<i64> = counted.iter().map(|(_, m)| *m).collect();
        adjust_entry_minutes(&mut minutes, settings);
        for (slot, m) in counted.iter_mut().zip(minutes) {
            slot.1 = m;
        }

        let week = week_start(entry.date);
        out.extend(
            counted
                .into_iter()
                .filter(|(_, m)| *m > 0)
                .map(|(start, minutes)| FlatBlock {
                    entry: idx,
                    week,
                    date: entry.date,
                    start,
                    minutes,
                    rate,
                    overtime_minutes: 0,
                }),
        );
    }

    out.sort_by(|a, b| (a.week, a.date, a.start).cmp(&(b.week, b.date, b.start)));
    out
}

/// Apply rounding and the unpaid break to one entry's block minutes.
///
/// The entry total is rounded to the nearest `rounding_minutes`, then reduced
/// by `break_minutes` and clamped at zero. `minutes` must be in start-time
/// order: extra minutes go to the last block, removed minutes come off the
/// last blocks first.
pub fn adjust_entry_minutes(minutes: &mut [i64], settings: &PaySettings) {
    let raw: i64 = minutes.iter().sum();
    if raw == 0 {
        return;
    }

    let mut target = raw;
    if settings.rounding_minutes > 0 {
        let step = settings.rounding_minutes;
        target = (raw as f64 / step as f64).round() as i64 * step;
    }
    target = (target - settings.break_minutes.max(0)).max(0);

    let delta = target - raw;
    if delta > 0 {
        if let Some(last) = minutes.last_mut() {
            *last += delta;
        }
    } else if delta < 0 {
        let mut cut = -delta;
        for m in minutes.iter_mut().rev() {
            let take = (*m).min(cut);
            *m -= take;
            cut -= take;
            if cut == 0 {
                break;
            }
        }
    }
}

/// Split one week's blocks into regular and overtime minutes.
///
/// `week` must be in chronological order. Overtime is charged to the latest
/// block first.
pub fn allocate_overtime(week: &mut [FlatBlock], settings: &PaySettings) {
    let total: i64 = week.iter().map(|b| b.minutes).sum();
    let overtime_hours = (total as f64 / 60.0 - settings.overtime_threshold_hours).max(0.0);
    let mut remaining = ((overtime_hours * 60.0).round() as i64).min(total);

    for b in week.iter_mut().rev() {
        let take = b.minutes.min(remaining);
        b.overtime_minutes = take;
        remaining -= take;
    }
}
