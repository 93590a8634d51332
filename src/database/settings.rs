use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{LeagueSettingsRow, LeagueSettingsUpdate};

pub fn find_for_season(conn: &mut DbConn, season_id: i64) -> Result<Option<LeagueSettingsRow>> {
    let sql = "SELECT season_id, game_start_chip_count, calculation_base_chip_count, uma_1st, uma_2nd, uma_3rd FROM league_settings WHERE season_id = ?1";

    conn.query_row(sql, params![season_id], parse_settings_row)
        .optional()
        .context("Failed to query league settings")
}

pub fn update_for_season(
    conn: &mut DbConn,
    season_id: i64,
    update: &LeagueSettingsUpdate,
) -> Result<()> {
    let sql = "UPDATE league_settings SET game_start_chip_count = ?1, calculation_base_chip_count = ?2, uma_1st = ?3, uma_2nd = ?4, uma_3rd = ?5 WHERE season_id = ?6";

    conn.execute(
        sql,
        params![
            update.game_start_chip_count,
            update.calculation_base_chip_count,
            update.uma_1st,
            update.uma_2nd,
            update.uma_3rd,
            season_id
        ],
    )
    .context("Failed to update league settings")
    .map(|_| ())
}

fn parse_settings_row(row: &rusqlite::Row) -> rusqlite::Result<LeagueSettingsRow> {
    Ok(LeagueSettingsRow {
        season_id: row.get(0)?,
        game_start_chip_count: row.get(1)?,
        calculation_base_chip_count: row.get(2)?,
        uma_1st: row.get(3)?,
        uma_2nd: row.get(4)?,
        uma_3rd: row.get(5)?,
    })
}
