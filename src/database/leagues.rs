use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::config::LeagueSettings;
use crate::domain::{LeagueId, LeagueSummary};

pub fn insert_league(
    conn: &mut DbConn,
    id: LeagueId,
    name: &str,
    settings: &LeagueSettings,
) -> Result<()> {
    let sql = "INSERT INTO leagues (id, name, handicap_multiplier, handicap_min_rounds, handicap_min_rounds_avg, handicap_max_rounds_avg, league_points) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

    conn.execute(
        sql,
        params![
            id,
            name,
            settings.handicap_multiplier,
            settings.handicap_min_rounds,
            settings.handicap_min_rounds_avg,
            settings.handicap_max_rounds_avg,
            settings.points_column()
        ],
    )
    .with_context(|| format!("Failed to insert league {}", id))?;
    Ok(())
}

struct SettingsRow {
    name: String,
    multiplier: f64,
    min_rounds: i64,
    min_rounds_avg: i64,
    max_rounds_avg: i64,
    points: String,
}

fn parse_settings_row(row: &rusqlite::Row) -> rusqlite::Result<SettingsRow> {
    Ok(SettingsRow {
        name: row.get(0)?,
        multiplier: row.get(1)?,
        min_rounds: row.get(2)?,
        min_rounds_avg: row.get(3)?,
        max_rounds_avg: row.get(4)?,
        points: row.get(5)?,
    })
}

/// League name and its validated settings
pub fn find_by_id(
    conn: &mut DbConn,
    id: LeagueId,
) -> Result<Option<(String, LeagueSettings)>> {
    let sql = "SELECT name, handicap_multiplier, handicap_min_rounds, handicap_min_rounds_avg, handicap_max_rounds_avg, league_points FROM leagues WHERE id = ?1";

    let row = conn
        .query_row(sql, params![id], parse_settings_row)
        .optional()
        .context("Failed to query league by id")?;

    let Some(row) = row else {
        return Ok(None);
    };

    let settings = LeagueSettings::from_columns(
        row.multiplier,
        row.min_rounds,
        row.min_rounds_avg,
        row.max_rounds_avg,
        &row.points,
    )
    .with_context(|| format!("League {} has an invalid configuration", id))?;

    Ok(Some((row.name, settings)))
}

pub fn list_summaries(conn: &mut DbConn) -> Result<Vec<LeagueSummary>> {
    let sql = "
        SELECT
            l.id,
            l.name,
            (SELECT COUNT(*) FROM contestants c WHERE c.league_id = l.id),
            (SELECT COUNT(*) FROM events e WHERE e.league_id = l.id)
        FROM leagues l
        ORDER BY l.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(LeagueSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                contestants: row.get::<_, i64>(2)? as usize,
                events: row.get::<_, i64>(3)? as usize,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
