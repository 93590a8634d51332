use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{Season, SeasonPatch, SeasonSummary};
use crate::config::settings::ScoringDefaults;

const SEASON_COLUMNS: &str =
    "id, name, start_date, end_date, is_active, description, created_date";

#[allow(clippy::too_many_arguments)]
pub fn create_season(
    conn: &mut DbConn,
    name: &str,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    is_active: bool,
    description: Option<&str>,
    defaults: &ScoringDefaults,
) -> Result<Season> {
    let tx = conn.transaction()?;

    let season = tx
        .query_row(
            &format!(
                "INSERT INTO seasons (name, start_date, end_date, is_active, description) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {SEASON_COLUMNS}"
            ),
            params![name, start_date, end_date, is_active, description],
            parse_season_row,
        )
        .context("Failed to insert new season")?;

    // Every season is born with the default scoring configuration.
    tx.execute(
        "INSERT INTO league_settings (season_id, game_start_chip_count, calculation_base_chip_count, uma_1st, uma_2nd, uma_3rd) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            season.id,
            defaults.game_start_chip_count,
            defaults.calculation_base_chip_count,
            defaults.uma[0],
            defaults.uma[1],
            defaults.uma[2]
        ],
    )
    .context("Failed to insert default league settings")?;

    tx.commit()?;
    Ok(season)
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Season>> {
    let sql = format!("SELECT {SEASON_COLUMNS} FROM seasons WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_season_row)
        .optional()
        .context("Failed to query season by id")
}

pub fn find_by_name(conn: &mut DbConn, name: &str) -> Result<Option<Season>> {
    let sql = format!("SELECT {SEASON_COLUMNS} FROM seasons WHERE name = ?1");

    conn.query_row(&sql, params![name], parse_season_row)
        .optional()
        .context("Failed to query season by name")
}

pub fn find_active(conn: &mut DbConn) -> Result<Option<Season>> {
    let sql = format!("SELECT {SEASON_COLUMNS} FROM seasons WHERE is_active = 1 LIMIT 1");

    conn.query_row(&sql, [], parse_season_row)
        .optional()
        .context("Failed to query active season")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Season>> {
    let sql = format!("SELECT {SEASON_COLUMNS} FROM seasons ORDER BY created_date DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_season_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Game and distinct-player counts per season, for season listings.
pub fn summaries(conn: &mut DbConn) -> Result<HashMap<i64, SeasonSummary>> {
    let mut by_season: HashMap<i64, SeasonSummary> = HashMap::new();

    let mut stmt =
        conn.prepare("SELECT season_id, COUNT(*) FROM games GROUP BY season_id")?;
    let game_counts = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    for (season_id, count) in game_counts {
        by_season.entry(season_id).or_default().game_count = count;
    }

    let mut stmt = conn.prepare(
        "SELECT g.season_id, COUNT(DISTINCT gr.player_id) FROM games g JOIN game_results gr ON gr.game_id = g.id GROUP BY g.season_id",
    )?;
    let player_counts = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    for (season_id, count) in player_counts {
        by_season.entry(season_id).or_default().player_count = count;
    }

    Ok(by_season)
}

pub fn update_season(conn: &mut DbConn, id: i64, patch: &SeasonPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        conn.execute("UPDATE seasons SET name = ?1 WHERE id = ?2", params![name, id])
            .context("Failed to update season name")?;
    }

    if let Some(start_date) = patch.start_date {
        conn.execute(
            "UPDATE seasons SET start_date = ?1 WHERE id = ?2",
            params![start_date, id],
        )
        .context("Failed to update season start date")?;
    }

    if let Some(end_date) = patch.end_date {
        conn.execute(
            "UPDATE seasons SET end_date = ?1 WHERE id = ?2",
            params![end_date, id],
        )
        .context("Failed to update season end date")?;
    }

    if let Some(description) = &patch.description {
        conn.execute(
            "UPDATE seasons SET description = ?1 WHERE id = ?2",
            params![description, id],
        )
        .context("Failed to update season description")?;
    }

    match patch.is_active {
        // Activation must deactivate every other season; route through the
        // same statements as the explicit activate operation.
        Some(true) => set_active(conn, id)?,
        Some(false) => {
            conn.execute(
                "UPDATE seasons SET is_active = 0 WHERE id = ?1",
                params![id],
            )
            .context("Failed to deactivate season")?;
        }
        None => {}
    }

    Ok(())
}

/// Activates one season, deactivating all others in the same transaction
/// so at most one season is ever active.
pub fn set_active(conn: &mut DbConn, id: i64) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute("UPDATE seasons SET is_active = 0", [])
        .context("Failed to deactivate seasons")?;
    tx.execute(
        "UPDATE seasons SET is_active = 1 WHERE id = ?1",
        params![id],
    )
    .context("Failed to activate season")?;

    tx.commit()?;
    Ok(())
}

fn parse_season_row(row: &rusqlite::Row) -> rusqlite::Result<Season> {
    Ok(Season {
        id: row.get(0)?,
        name: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        is_active: row.get(4)?,
        description: row.get(5)?,
        created_date: row.get(6)?,
    })
}
