use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{CardId, Score};

pub fn insert_score(conn: &mut DbConn, card_id: CardId, score: &Score) -> Result<()> {
    let sql = "INSERT INTO scores (card_id, contestant_id, strokes) VALUES (?1, ?2, ?3)";

    conn.execute(sql, params![card_id, score.contestant_id, score.strokes])
        .with_context(|| {
            format!(
                "Failed to insert score of contestant {} on card {}",
                score.contestant_id, card_id
            )
        })?;
    Ok(())
}

pub fn list_by_card(conn: &mut DbConn, card_id: CardId) -> Result<Vec<Score>> {
    let sql = "SELECT contestant_id, strokes FROM scores WHERE card_id = ?1 ORDER BY contestant_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![card_id], |row| {
            Ok(Score {
                contestant_id: row.get(0)?,
                strokes: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
