//! Monthly totals and the month-end pay projection.

use crate::core::calculator::pay::PayReport;
use crate::models::entry::Entry;
use crate::utils::date;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotals {
    pub year: i32,
    pub month: u32,
    pub minutes: i64,
    pub pay: f64,
    pub worked_days: usize,
}

impl MonthTotals {
    pub fn hours(&self) -> f64 {
        self.minutes as f64 / 60.0
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub totals: MonthTotals,
    pub today: NaiveDate,
    pub avg_daily_pay: f64,
    pub remaining_weekdays: u32,
    pub projected_pay: f64,
}

/// Sum hours and pay of the entries dated in `year`/`month`.
///
/// `report` must come from the same `entries` slice (index-aligned).
pub fn month_totals(entries: &[Entry], report: &PayReport, year: i32, month: u32) -> MonthTotals {
    let mut minutes = 0;
    let mut pay = 0.0;
    let mut days = BTreeSet::new();

    for (entry, computed) in entries.iter().zip(&report.entries) {
        if entry.date.year() != year || entry.date.month() != month {
            continue;
        }
        minutes += computed.minutes;
        pay += computed.pay;
        if computed.minutes > 0 {
            days.insert(entry.date);
        }
    }

    MonthTotals {
        year,
        month,
        minutes,
        pay,
        worked_days: days.len(),
    }
}

/// Extrapolate the month's pay: the average pay per worked day, times the
/// weekdays after `today` that have nothing logged yet, on top of what is
/// already earned.
pub fn project_month(entries: &[Entry], report: &PayReport, today: NaiveDate) -> Projection {
    let totals = month_totals(entries, report, today.year(), today.month());

    let avg_daily_pay = if totals.worked_days > 0 {
        totals.pay / totals.worked_days as f64
    } else {
        0.0
    };

    let logged: BTreeSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let remaining_weekdays = date::all_days_of_month(today.year(), today.month())
        .into_iter()
        .filter(|d| *d > today)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|d| !logged.contains(d))
        .count() as u32;

    Projection {
        projected_pay: totals.pay + avg_daily_pay * remaining_weekdays as f64,
        totals,
        today,
        avg_daily_pay,
        remaining_weekdays,
    }
}
