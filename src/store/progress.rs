//! Unlocked achievements and key/value bookkeeping

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use crate::engine::calendar::{format_date, parse_date};

const LAST_SEEN_DAY: &str = "last_seen_day";

pub fn get_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM meta WHERE key = ?1", [key], |r| r.get(0))
        .optional()?;
    Ok(value)
}

pub fn set_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Day the tracker last ran on. An unreadable value counts as never.
pub fn last_seen_day(conn: &Connection) -> Result<Option<NaiveDate>> {
    Ok(get_meta(conn, LAST_SEEN_DAY)?.and_then(|s| parse_date(&s).ok()))
}

pub fn set_last_seen_day(conn: &Connection, day: NaiveDate) -> Result<()> {
    set_meta(conn, LAST_SEEN_DAY, &format_date(day))
}

/// Get all unlocked achievement ids
pub fn unlocked_ids(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT id FROM achievements")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}

/// Unlocked achievements with their unlock time, oldest first
pub fn unlocked_with_time(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare("SELECT id, unlocked_at FROM achievements ORDER BY unlocked_at, id")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Record an unlock. Returns false if it was already unlocked.
pub fn unlock(conn: &Connection, id: &str, unlocked_at: i64) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO achievements (id, unlocked_at) VALUES (?1, ?2)",
        params![id, unlocked_at],
    )?;
    Ok(inserted > 0)
}
