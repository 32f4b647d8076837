use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::job::Job;
use crate::models::time_block::TimeBlock;
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, Transaction, params};
use std::collections::HashMap;

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

// ---------------------------
// Jobs
// ---------------------------

fn map_job(row: &Row) -> Result<Job> {
    Ok(Job {
        id: row.get("id")?,
        name: row.get("name")?,
        rate: row.get("rate")?,
    })
}

pub fn load_jobs(conn: &Connection) -> AppResult<Vec<Job>> {
    let mut stmt = conn.prepare("SELECT id, name, rate FROM jobs ORDER BY name ASC, id ASC")?;
    let rows = stmt.query_map([], map_job)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_job(conn: &Connection, id: &str) -> AppResult<Option<Job>> {
    let job = conn
        .query_row(
            "SELECT id, name, rate FROM jobs WHERE id = ?1",
            [id],
            map_job,
        )
        .optional()?;
    Ok(job)
}

pub fn insert_job(conn: &Connection, job: &Job) -> AppResult<()> {
    conn.execute(
        "INSERT INTO jobs (id, name, rate) VALUES (?1, ?2, ?3)",
        params![job.id, job.name, job.rate],
    )?;
    Ok(())
}

pub fn delete_job(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM jobs WHERE id = ?1", [id])?)
}

pub fn count_entries_for_job(conn: &Connection, id: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE job_id = ?1",
        [id],
        |row| row.get(0),
    )?)
}

// ---------------------------
// Entries
// ---------------------------

fn parse_stored_time(raw: &str) -> Result<Option<NaiveTime>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(Some)
        .map_err(|_| conversion_error(AppError::InvalidTime(raw.to_string())))
}

fn stored_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

fn map_entry(row: &Row) -> Result<Entry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    Ok(Entry {
        id: row.get("id")?,
        date,
        job_id: row.get("job_id")?,
        blocks: Vec::new(),
        notes: row.get("notes")?,
    })
}

fn map_block(row: &Row) -> Result<(i64, TimeBlock)> {
    let start: String = row.get("start_time")?;
    let end: String = row.get("end_time")?;
    Ok((
        row.get("entry_id")?,
        TimeBlock {
            start: parse_stored_time(&start)?,
            end: parse_stored_time(&end)?,
        },
    ))
}

/// Load every entry with its blocks, ordered by date then id.
pub fn load_entries(conn: &Connection) -> AppResult<Vec<Entry>> {
    let mut stmt =
        conn.prepare("SELECT id, date, job_id, notes FROM entries ORDER BY date ASC, id ASC")?;
    let rows = stmt.query_map([], map_entry)?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }

    let mut stmt = conn.prepare(
        "SELECT entry_id, start_time, end_time FROM blocks ORDER BY entry_id ASC, position ASC",
    )?;
    let rows = stmt.query_map([], map_block)?;

    let mut by_entry: HashMap<i64, Vec<TimeBlock>> = HashMap::new();
    for r in rows {
        let (entry_id, block) = r?;
        by_entry.entry(entry_id).or_default().push(block);
    }

    for e in entries.iter_mut() {
        e.blocks = by_entry.remove(&e.id).unwrap_or_default();
    }

    Ok(entries)
}

pub fn find_entry(conn: &Connection, id: i64) -> AppResult<Option<Entry>> {
    let entry = conn
        .query_row(
            "SELECT id, date, job_id, notes FROM entries WHERE id = ?1",
            [id],
            map_entry,
        )
        .optional()?;

    let Some(mut entry) = entry else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT entry_id, start_time, end_time FROM blocks WHERE entry_id = ?1 ORDER BY position ASC",
    )?;
    let rows = stmt.query_map([id], map_block)?;
    for r in rows {
        entry.blocks.push(r?.1);
    }

    Ok(Some(entry))
}

fn insert_entry_tx(tx: &Transaction, entry: &Entry) -> AppResult<i64> {
    tx.execute(
        "INSERT INTO entries (date, job_id, notes, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            entry.date_str(),
            entry.job_id,
            entry.notes,
            Local::now().to_rfc3339()
        ],
    )?;
    let id = tx.last_insert_rowid();

    let mut stmt = tx.prepare_cached(
        "INSERT INTO blocks (entry_id, position, start_time, end_time) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (pos, b) in entry.blocks.iter().enumerate() {
        stmt.execute(params![
            id,
            pos as i64,
            stored_time(b.start),
            stored_time(b.end),
        ])?;
    }

    Ok(id)
}

/// Store an entry and its blocks atomically. Returns the new entry id.
pub fn insert_entry(conn: &mut Connection, entry: &Entry) -> AppResult<i64> {
    let tx = conn.transaction()?;
    let id = insert_entry_tx(&tx, entry)?;
    tx.commit()?;
    Ok(id)
}

/// Delete an entry. Its blocks go with it (`ON DELETE CASCADE`).
pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM entries WHERE id = ?1", [id])?)
}

/// Replace all jobs and entries in a single transaction.
///
/// Entry ids are reassigned by the database.
pub fn replace_all(conn: &mut Connection, jobs: &[Job], entries: &[Entry]) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute_batch("DELETE FROM blocks; DELETE FROM entries; DELETE FROM jobs;")?;

    for job in jobs {
        insert_job(&tx, job)?;
    }
    for entry in entries {
        insert_entry_tx(&tx, entry)?;
    }

    tx.commit()?;
    Ok(())
}
