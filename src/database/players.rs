use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Player, PlayerId};

const PLAYER_COLUMNS: &str = "id, first_name, last_name, email_address, phone_number, pdga_number";

pub fn insert_player(conn: &mut DbConn, player: &Player) -> Result<()> {
    let sql = format!("INSERT INTO players ({PLAYER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)");

    conn.execute(
        &sql,
        params![
            player.id,
            player.first_name,
            player.last_name,
            player.email_address,
            player.phone_number,
            player.pdga_number
        ],
    )
    .with_context(|| format!("Failed to insert player {}", player.id))?;
    Ok(())
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email_address: row.get(3)?,
        phone_number: row.get(4)?,
        pdga_number: row.get(5)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: PlayerId) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

