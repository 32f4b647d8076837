//! SQLite connection wrapper (lightweight for CLI usage).

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::migrate::MigrationSeed;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database at `path`, bringing its schema up to date with
    /// built-in seed values.
    pub fn new(path: &str) -> AppResult<Self> {
        Self::open(path, &MigrationSeed::default())
    }

    /// Open the configured database. A fresh database gets its default job
    /// at the configured `default_rate`.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::open(&cfg.database, &cfg.migration_seed())
    }

    pub fn open(path: &str, seed: &MigrationSeed) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        init_db(&conn, seed)?;
        Ok(Self { conn })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }
}
