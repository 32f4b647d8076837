//! Whole-state snapshots: the user's jobs, entries and pay settings written
//! out or read back as one JSON document.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries, load_jobs, replace_all};
use crate::errors::{AppError, AppResult};
use crate::models::document::{DOCUMENT_VERSION, Document};
use crate::models::settings::PaySettings;
use chrono::Local;
use std::fs;
use std::path::Path;

pub struct DocumentLogic;

impl DocumentLogic {
    pub fn collect(pool: &DbPool, settings: &PaySettings) -> AppResult<Document> {
        Ok(Document {
            version: DOCUMENT_VERSION,
            saved_at: Local::now().to_rfc3339(),
            settings: *settings,
            jobs: load_jobs(&pool.conn)?,
            entries: load_entries(&pool.conn)?,
        })
    }

    pub fn save(doc: &Document, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> AppResult<Document> {
        let content = fs::read_to_string(path)?;
        let doc: Document = serde_json::from_str(&content)?;
        if doc.version > DOCUMENT_VERSION {
            return Err(AppError::DocumentVersion(doc.version));
        }
        doc.settings
            .validate()
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(doc)
    }

    /// Replace every job and entry with the document's content.
    pub fn restore(pool: &mut DbPool, doc: &Document, source: &str) -> AppResult<()> {
        pool.with_conn(|conn| replace_all(conn, &doc.jobs, &doc.entries))?;

        ttlog(
            &pool.conn,
            "restore",
            source,
            &format!(
                "{} jobs, {} entries (saved {})",
                doc.jobs.len(),
                doc.entries.len(),
                doc.saved_at
            ),
        )?;
        Ok(())
    }
}
