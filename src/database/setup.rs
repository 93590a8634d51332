use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::config::settings::ScoringDefaults;

pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        if !statement.trim().is_empty() {
            execute_sql(conn, statement)
                .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
        }
    }

    log::info!("Database schema reset successfully");
    Ok(())
}

/// Seeds the first season with the default league settings, matching a
/// fresh deployment.
pub fn seed_initial_season(conn: &mut DbConn, defaults: &ScoringDefaults) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO seasons (name, start_date, is_active, description) VALUES (?1, ?2, 1, ?3)",
        params![
            "Season 1",
            "2025-01-01",
            "First season of the mahjong league"
        ],
    )
    .context("Failed to seed initial season")?;

    let season_id = tx.last_insert_rowid();

    tx.execute(
        "INSERT INTO league_settings (season_id, game_start_chip_count, calculation_base_chip_count, uma_1st, uma_2nd, uma_3rd) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            season_id,
            defaults.game_start_chip_count,
            defaults.calculation_base_chip_count,
            defaults.uma[0],
            defaults.uma[1],
            defaults.uma[2]
        ],
    )
    .context("Failed to seed default league settings")?;

    tx.commit()?;

    log::info!("Seeded initial season with default league settings");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
