use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_entry, find_entry};
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one entry (and its blocks). Returns what was removed.
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<Entry> {
        let entry = find_entry(&pool.conn, id)?.ok_or(AppError::EntryNotFound(id))?;

        delete_entry(&pool.conn, id)?;

        ttlog(
            &pool.conn,
            "del",
            &entry.date_str(),
            &format!("entry #{} job={}", id, entry.job_id),
        )?;

        Ok(entry)
    }
}
