use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::document::DocumentLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::path::expand_tilde;

/// Replace the stored state with a snapshot. Pay settings from the document
/// are written to the configuration file too (not in test mode).
pub fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    if let Commands::Restore { file, yes } = cmd {
        let path = expand_tilde(file);
        let doc = DocumentLogic::load(&path)?;

        let prompt = format!(
            "Replace ALL jobs and entries with {} jobs and {} entries from {}?",
            doc.jobs.len(),
            doc.entries.len(),
            path.display()
        );
        if !*yes && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = DbPool::from_config(cfg)?;
        DocumentLogic::restore(&mut pool, &doc, &path.to_string_lossy())?;

        if !is_test {
            let mut updated = cfg.clone();
            updated.apply_pay_settings(&doc.settings);
            updated.save()?;
        }

        success(format!(
            "Restored {} jobs and {} entries.",
            doc.jobs.len(),
            doc.entries.len()
        ));
    }
    Ok(())
}
