use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Event, EventId, LeagueId};

const EVENT_COLUMNS: &str = "id, league_id, name, date, rounds";

pub fn insert_event(conn: &mut DbConn, event: &Event) -> Result<()> {
    let sql = format!("INSERT INTO events ({EVENT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)");

    conn.execute(
        &sql,
        params![event.id, event.league_id, event.name, event.date, event.rounds],
    )
    .with_context(|| format!("Failed to insert event {}", event.id))?;
    Ok(())
}

fn parse_event_row(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        league_id: row.get(1)?,
        name: row.get(2)?,
        date: row.get(3)?,
        rounds: row.get(4)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: EventId) -> Result<Option<Event>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_event_row)
        .optional()
        .context("Failed to query event by id")
}

/// Events of a league, oldest first
pub fn list_by_league(conn: &mut DbConn, league_id: LeagueId) -> Result<Vec<Event>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE league_id = ?1 ORDER BY date, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![league_id], parse_event_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
