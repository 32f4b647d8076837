use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::document::DocumentLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Snapshot { out } = cmd {
        let pool = DbPool::from_config(cfg)?;
        let path = expand_tilde(out);

        let doc = DocumentLogic::collect(&pool, &cfg.pay_settings())?;
        DocumentLogic::save(&doc, &path)?;

        ttlog(
            &pool.conn,
            "snapshot",
            &path.to_string_lossy(),
            &format!("{} jobs, {} entries", doc.jobs.len(), doc.entries.len()),
        )?;

        success(format!(
            "Snapshot written to {} ({} jobs, {} entries).",
            path.display(),
            doc.jobs.len(),
            doc.entries.len()
        ));
    }
    Ok(())
}
