use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Contestant, ContestantId, LeagueId};

pub fn insert_contestant(
    conn: &mut DbConn,
    league_id: LeagueId,
    contestant: &Contestant,
) -> Result<()> {
    let sql = "INSERT INTO contestants (id, league_id, player_id, initial_handicap) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(
        sql,
        params![
            contestant.id,
            league_id,
            contestant.player_id,
            contestant.initial_handicap
        ],
    )
    .with_context(|| format!("Failed to insert contestant {}", contestant.id))?;
    Ok(())
}

fn parse_contestant_row(row: &rusqlite::Row) -> rusqlite::Result<Contestant> {
    Ok(Contestant {
        id: row.get(0)?,
        player_id: row.get(1)?,
        initial_handicap: row.get(2)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: ContestantId) -> Result<Option<Contestant>> {
    let sql = "SELECT id, player_id, initial_handicap FROM contestants WHERE id = ?1";

    conn.query_row(sql, params![id], parse_contestant_row)
        .optional()
        .context("Failed to query contestant by id")
}

pub fn list_by_league(conn: &mut DbConn, league_id: LeagueId) -> Result<Vec<Contestant>> {
    let sql = "SELECT id, player_id, initial_handicap FROM contestants WHERE league_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![league_id], parse_contestant_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Conditional write: a handicap that is already set is never replaced.
pub fn set_initial_handicap_if_unset(
    conn: &mut DbConn,
    id: ContestantId,
    handicap: f64,
) -> Result<bool> {
    let sql = "UPDATE contestants SET initial_handicap = ?1 WHERE id = ?2 AND initial_handicap IS NULL";

    let changed = conn
        .execute(sql, params![handicap, id])
        .context("Failed to set initial handicap")?;
    Ok(changed > 0)
}
