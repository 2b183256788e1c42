use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{Award, EventId};

pub fn insert_award(conn: &mut DbConn, event_id: EventId, award: &Award) -> Result<()> {
    let sql = "INSERT INTO awards (event_id, contestant_id, name) VALUES (?1, ?2, ?3)";

    conn.execute(sql, params![event_id, award.contestant_id, award.name])
        .with_context(|| format!("Failed to insert award for event {}", event_id))?;
    Ok(())
}

pub fn list_by_event(conn: &mut DbConn, event_id: EventId) -> Result<Vec<Award>> {
    let sql = "SELECT name, contestant_id FROM awards WHERE event_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![event_id], |row| {
            Ok(Award {
                name: row.get(0)?,
                contestant_id: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
