use crate::core::calculator::pay::{self, PayReport};
use crate::core::calculator::projection::{self, MonthTotals, Projection};
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries, load_jobs};
use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::models::job::Job;
use crate::models::settings::PaySettings;
use chrono::NaiveDate;

/// Everything stored, with pay already computed.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub jobs: Vec<Job>,
    pub entries: Vec<Entry>,
    pub report: PayReport,
}

impl Ledger {
    pub fn job_name(&self, id: &str) -> Option<&str> {
        self.jobs.iter().find(|j| j.id == id).map(|j| j.name.as_str())
    }

    pub fn month_totals(&self, year: i32, month: u32) -> MonthTotals {
        projection::month_totals(&self.entries, &self.report, year, month)
    }

    pub fn projection(&self, today: NaiveDate) -> Projection {
        projection::project_month(&self.entries, &self.report, today)
    }
}

pub struct Core;

impl Core {
    pub fn compute(entries: Vec<Entry>, jobs: Vec<Job>, settings: &PaySettings) -> Ledger {
        let report = pay::allocate(&entries, &jobs, settings);
        Ledger {
            jobs,
            entries,
            report,
        }
    }

    /// Load jobs and entries and allocate pay over all of them.
    pub fn build_ledger(pool: &DbPool, settings: &PaySettings) -> AppResult<Ledger> {
        let jobs = load_jobs(&pool.conn)?;
        let entries = load_entries(&pool.conn)?;
        Ok(Self::compute(entries, jobs, settings))
    }
}
