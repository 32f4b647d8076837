use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::time_block::TimeBlock;
use crate::utils::date;

/// Save a new day of work.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        job,
        blocks,
        notes,
    } = cmd
    {
        let d = date::parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        let parsed = blocks
            .iter()
            .map(|b| TimeBlock::parse(b))
            .collect::<AppResult<Vec<_>>>()?;

        let entry = Entry::new(d, job.trim(), parsed).with_notes(notes.clone().unwrap_or_default());

        let mut pool = DbPool::from_config(cfg)?;
        AddLogic::apply(&mut pool, &entry)?;
    }

    Ok(())
}
