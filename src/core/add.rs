use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{find_job, insert_entry};
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::ui::messages::{success, warning};
use crate::utils::mins2readable;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Save a new entry. Returns the stored id.
    ///
    /// Blocks that will not count (missing or equal ends) are stored anyway,
    /// with a warning.
    pub fn apply(pool: &mut DbPool, entry: &Entry) -> AppResult<i64> {
        if entry.blocks.is_empty() {
            return Err(AppError::InvalidBlock(
                "at least one --block is required".to_string(),
            ));
        }

        if find_job(&pool.conn, &entry.job_id)?.is_none() {
            return Err(AppError::JobNotFound(entry.job_id.clone()));
        }

        for b in entry.blocks.iter().filter(|b| !b.is_valid()) {
            warning(format!(
                "Block {} has no valid duration and will not be counted.",
                b
            ));
        }

        let id = pool.with_conn(|conn| insert_entry(conn, entry))?;

        let blocks: Vec<String> = entry.blocks.iter().map(|b| b.to_string()).collect();
        ttlog(
            &pool.conn,
            "add",
            &entry.date_str(),
            &format!(
                "entry #{} job={} blocks=[{}]",
                id,
                entry.job_id,
                blocks.join(", ")
            ),
        )?;

        success(format!(
            "Entry #{} saved for {} ({} worked).",
            id,
            entry.date,
            mins2readable(entry.raw_minutes(), false, false)
        ));

        Ok(id)
    }
}
