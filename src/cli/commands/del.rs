use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::db::queries::find_entry;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut pool = DbPool::from_config(cfg)?;

        let entry = find_entry(&pool.conn, *id)?.ok_or(AppError::EntryNotFound(*id))?;

        let prompt = format!(
            "Delete entry #{} ({}, job '{}', {} blocks)? This action is irreversible.",
            entry.id,
            entry.date,
            entry.job_id,
            entry.blocks.len()
        );

        if !*yes && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = DeleteLogic::apply(&mut pool, *id)?;
        success(format!(
            "Entry #{} for {} has been deleted.",
            removed.id, removed.date
        ));
    }

    Ok(())
}
