//! Key-value entry query functions.

use rusqlite::{Connection, OptionalExtension};

use crate::Result;

/// Get the value stored under `key`, or `None` if absent.
pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

/// Insert or overwrite the value under `key`.
pub fn set(conn: &Connection, key: &str, value: &str, updated_at: u64) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![key, value, updated_at as i64],
    )?;
    Ok(())
}

/// Delete the entry under `key`. Returns `true` if a row was removed.
pub fn remove(conn: &Connection, key: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(deleted > 0)
}
