use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A closed range of dates resolved from a `--period` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }
}

/// Resolve `YYYY-MM-DD`, `YYYY-MM` or `YYYY` into a date range.
pub fn range_from_period(p: &str) -> Result<DateRange, String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok(DateRange { start: d, end: d });
    }

    // YYYY-MM
    if let Ok(dm) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        let days = all_days_of_month(dm.year(), dm.month());
        if let (Some(first), Some(last)) = (days.first(), days.last()) {
            return Ok(DateRange {
                start: *first,
                end: *last,
            });
        }
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok(DateRange { start, end });
    }

    Err(format!("Invalid period: {}", p))
}

/// Resolve `START:END`, where each side is any form accepted by
/// [`range_from_period`].
pub fn range_between(start: &str, end: &str) -> Result<DateRange, String> {
    let s = range_from_period(start)?;
    let e = range_from_period(end)?;

    if e.end < s.start {
        return Err(format!("Invalid range: {} is after {}", start, end));
    }

    Ok(DateRange {
        start: s.start,
        end: e.end,
    })
}

pub fn current_month() -> Result<DateRange, String> {
    let today = today();
    range_from_period(&today.format("%Y-%m").to_string())
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut next = NaiveDate::from_ymd_opt(year, month, 1);

    while let Some(d) = next {
        if d.month() != month {
            break;
        }
        out.push(d);
        next = d.succ_opt();
    }

    out
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(s: &str) -> Option<(i32, u32)> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .ok()
        .map(|d| (d.year(), d.month()))
}
