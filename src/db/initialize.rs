use crate::db::migrate::{MigrationSeed, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection, seed: &MigrationSeed) -> AppResult<usize> {
    let applied = run_pending_migrations(conn, seed)?;
    Ok(applied)
}
