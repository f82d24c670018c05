//! Persistence of workflow sessions, one row per session id.

use crate::errors::{AppError, AppResult};
use crate::workflow::state::WorkflowSession;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rusqlite::{Connection, OptionalExtension, params};

/// Fixed-width UTC timestamps so `updated_at` compares lexically.
fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn load(conn: &Connection, id: &str) -> AppResult<Option<WorkflowSession>> {
    let raw: Option<String> = conn
        .query_row("SELECT state FROM sessions WHERE id = ?1", [id], |row| {
            row.get(0)
        })
        .optional()?;

    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn save(conn: &Connection, id: &str, session: &WorkflowSession) -> AppResult<()> {
    let json = serde_json::to_string(session)?;
    conn.execute(
        "INSERT INTO sessions (id, state, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at",
        params![id, json, stamp(Utc::now())],
    )?;
    Ok(())
}

/// Returns true when a session was removed.
pub fn delete(conn: &Connection, id: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    Ok(n > 0)
}

/// Drop sessions idle for more than `ttl_minutes`.
pub fn purge_expired(conn: &Connection, ttl_minutes: i64) -> AppResult<usize> {
    let cutoff = TimeDelta::try_minutes(ttl_minutes)
        .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        .map(stamp)
        .ok_or_else(|| {
            AppError::Config(format!("session_ttl_minutes {ttl_minutes} is out of range"))
        })?;
    let n = conn.execute("DELETE FROM sessions WHERE updated_at < ?1", [cutoff])?;
    if n > 0 {
        tracing::info!(expired = n, "purged idle workflow sessions");
    }
    Ok(n)
}

/// All stored sessions as (id, updated_at, session), most recent first.
pub fn list(conn: &Connection) -> AppResult<Vec<(String, String, WorkflowSession)>> {
    let mut stmt =
        conn.prepare("SELECT id, updated_at, state FROM sessions ORDER BY updated_at DESC, id")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, updated_at, json) = r?;
        out.push((id, updated_at, serde_json::from_str(&json)?));
    }
    Ok(out)
}

/// Backdate a session; lets callers simulate idleness.
pub fn touch_at(conn: &Connection, id: &str, at: DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions SET updated_at = ?1 WHERE id = ?2",
        params![stamp(at), id],
    )?;
    Ok(())
}
