use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally zipped.
    ///
    /// Returns the path written, or `None` when the user declined to
    /// overwrite an existing file.
    pub fn backup(
        pool: &mut DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };

        if final_path.exists()
            && !force
            && !confirm(&format!(
                "The file '{}' already exists. Overwrite it?",
                final_path.display()
            ))
        {
            info("Backup cancelled.");
            return Ok(None);
        }

        if compress {
            compress_into(src, &final_path)?;
            success(format!("📦 Compressed backup created: {}", final_path.display()));
        } else {
            fs::copy(src, &final_path)?;
            success(format!("Backup created: {}", final_path.display()));
        }

        if let Err(e) = ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(Some(final_path))
    }
}

/// Write `src` as the single member of a deflated zip archive at `zip_path`.
fn compress_into(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rpaylog.sqlite".to_string());

    zip.start_file(name, options)?;
    let content = fs::read(src)?;
    zip.write_all(&content)?;
    zip.finish()?;

    Ok(())
}
