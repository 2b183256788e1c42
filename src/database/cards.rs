use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Card, CardId, EventId};

const CARD_COLUMNS: &str = "id, event_id, course_id, layout_id, date";

pub fn insert_card(conn: &mut DbConn, card: &Card) -> Result<()> {
    let sql = format!("INSERT INTO cards ({CARD_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)");

    conn.execute(
        &sql,
        params![card.id, card.event_id, card.course_id, card.layout_id, card.date],
    )
    .with_context(|| format!("Failed to insert card {}", card.id))?;
    Ok(())
}

fn parse_card_row(row: &rusqlite::Row) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        event_id: row.get(1)?,
        course_id: row.get(2)?,
        layout_id: row.get(3)?,
        date: row.get(4)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: CardId) -> Result<Option<Card>> {
    let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_card_row)
        .optional()
        .context("Failed to query card by id")
}

/// Cards of an event in play order
pub fn list_by_event(conn: &mut DbConn, event_id: EventId) -> Result<Vec<Card>> {
    let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE event_id = ?1 ORDER BY date, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![event_id], parse_card_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
