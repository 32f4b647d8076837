use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

#[derive(Debug, Clone, Default)]
pub struct DbStats {
    pub file_size: u64,
    pub jobs: i64,
    pub entries: i64,
    pub blocks: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn collect(pool: &DbPool, db_path: &str) -> AppResult<DbStats> {
    let count = |sql: &str| -> rusqlite::Result<i64> {
        pool.conn.query_row(sql, [], |row| row.get(0))
    };

    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM entries", [], |row| row.get(0))?;
    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM entries", [], |row| row.get(0))?;

    Ok(DbStats {
        file_size: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        jobs: count("SELECT COUNT(*) FROM jobs")?,
        entries: count("SELECT COUNT(*) FROM entries")?,
        blocks: count("SELECT COUNT(*) FROM blocks")?,
        first_date,
        last_date,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let stats = collect(pool, db_path)?;
    println!();

    let file_mb = (stats.file_size as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!("{}• Jobs:{} {}{}{}", CYAN, RESET, GREEN, stats.jobs, RESET);
    println!(
        "{}• Entries:{} {}{}{} ({} blocks)",
        CYAN, RESET, GREEN, stats.entries, RESET, stats.blocks
    );

    let dash = || format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", stats.first_date.clone().unwrap_or_else(dash));
    println!("    to:   {}", stats.last_date.clone().unwrap_or_else(dash));

    println!();
    Ok(())
}
