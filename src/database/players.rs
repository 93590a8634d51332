use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::connection::DbConn;
use super::models::{Player, PlayerPatch};

pub fn create_player(
    conn: &mut DbConn,
    name: &str,
    avatar_url: Option<&str>,
) -> Result<Player> {
    let id = Uuid::new_v4().to_string();
    let sql = "INSERT INTO players (id, name, avatar_url) VALUES (?1, ?2, ?3) RETURNING id, name, avatar_url, created_date";

    conn.query_row(sql, params![id, name, avatar_url], parse_player_row)
        .context("Failed to insert new player")
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Player>> {
    let sql = "SELECT id, name, avatar_url, created_date FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = "SELECT id, name, avatar_url, created_date FROM players ORDER BY name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn update_player(conn: &mut DbConn, id: &str, patch: &PlayerPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        conn.execute("UPDATE players SET name = ?1 WHERE id = ?2", params![name, id])
            .context("Failed to update player name")?;
    }

    if let Some(avatar_url) = &patch.avatar_url {
        conn.execute(
            "UPDATE players SET avatar_url = ?1 WHERE id = ?2",
            params![avatar_url, id],
        )
        .context("Failed to update player avatar")?;
    }

    Ok(())
}

/// Number of game results this player appears in, across all seasons.
/// A player with history must never be deleted.
pub fn count_results_for_player(conn: &mut DbConn, id: &str) -> Result<i64> {
    let sql = "SELECT COUNT(*) FROM game_results WHERE player_id = ?1";

    conn.query_row(sql, params![id], |row| row.get(0))
        .context("Failed to count game results for player")
}

pub fn delete_player(conn: &mut DbConn, id: &str) -> Result<()> {
    conn.execute("DELETE FROM players WHERE id = ?1", params![id])
        .context("Failed to delete player")
        .map(|_| ())
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        avatar_url: row.get(2)?,
        created_date: row.get(3)?,
    })
}
