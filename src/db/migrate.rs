//! Versioned schema migrations.
//!
//! Each step runs once. Applied steps are recorded in the `log` table as
//! `migration_applied` rows whose `target` is the step version.

use crate::db::log::ttlog;
use crate::models::job::{DEFAULT_JOB_ID, DEFAULT_JOB_NAME, DEFAULT_RATE};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Values used by steps that seed data. Only read when the step first runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MigrationSeed {
    pub default_rate: f64,
}

impl Default for MigrationSeed {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_RATE,
        }
    }
}

type Step = fn(&Connection, &MigrationSeed) -> Result<()>;

/// Ordered list of (version, description, step).
const MIGRATIONS: &[(&str, &str, Step)] = &[
    ("20250901_0001_create_jobs", "Created jobs table", create_jobs_table),
    (
        "20250901_0002_create_entries",
        "Created entries and blocks tables",
        create_entries_tables,
    ),
    ("20250901_0003_seed_default_job", "Seeded default job", seed_default_job),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_jobs_table(conn: &Connection, _seed: &MigrationSeed) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id         TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            rate       REAL NOT NULL DEFAULT 0 CHECK(rate >= 0)
        );
        "#,
    )
}

fn create_entries_tables(conn: &Connection, _seed: &MigrationSeed) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            date       TEXT NOT NULL,
            job_id     TEXT NOT NULL,
            notes      TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS blocks (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_id   INTEGER NOT NULL REFERENCES entries(id) ON DELETE CASCADE,
            position   INTEGER NOT NULL,
            start_time TEXT NOT NULL DEFAULT '',
            end_time   TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
        CREATE INDEX IF NOT EXISTS idx_blocks_entry ON blocks(entry_id, position);
        "#,
    )
}

fn seed_default_job(conn: &Connection, seed: &MigrationSeed) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO jobs (id, name, rate) VALUES (?1, ?2, ?3)",
        params![DEFAULT_JOB_ID, DEFAULT_JOB_NAME, seed.default_rate.max(0.0)],
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Returns the number of steps applied.
pub fn run_pending_migrations(conn: &Connection, seed: &MigrationSeed) -> Result<usize> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, description, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        step(conn, seed)?;

        ttlog(conn, "migration_applied", version, description).map_err(|e| {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to record migration {}: {}", version, e)),
            )
        })?;

        success(format!("Migration applied: {} → {}", version, description));
        applied += 1;
    }

    Ok(applied)
}
