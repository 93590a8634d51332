use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Transaction};
use uuid::Uuid;

use super::connection::DbConn;
use crate::scoring::{GameResultRow, GameRow, ResultRow, ValidGame, Window};

/// Translates a window into the games-table filter. Each variant has its
/// own fixed clause; membership matches `Window::contains` exactly.
fn window_filter(window: &Window) -> (&'static str, Vec<Value>) {
    match window {
        Window::AllTime => ("", vec![]),
        Window::Season(season_id) => {
            ("WHERE g.season_id = ?1", vec![Value::from(*season_id)])
        }
        Window::SingleDate(date) => (
            "WHERE g.game_date = ?1",
            vec![Value::from(date.to_string())],
        ),
        Window::DateRange { start, end } => (
            "WHERE g.game_date BETWEEN ?1 AND ?2",
            vec![
                Value::from(start.to_string()),
                Value::from(end.to_string()),
            ],
        ),
    }
}

/// Inserts the game row and its four results in one transaction; either
/// everything commits or nothing does.
pub fn insert_game_with_results(
    conn: &mut DbConn,
    season_id: i64,
    game: &ValidGame,
    points: &[f64],
) -> Result<GameRow> {
    let game_id = Uuid::new_v4().to_string();
    let recorded_date = Utc::now().naive_utc();

    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO games (id, season_id, game_date, round_name, total_hands_in_game, recorded_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            game_id,
            season_id,
            game.game_date,
            game.round_name,
            game.total_hands_in_game,
            recorded_date
        ],
    )
    .context("Failed to insert game")?;

    insert_results(&tx, &game_id, game, points)?;

    tx.commit()?;

    Ok(GameRow {
        id: game_id,
        season_id,
        season_name: None,
        game_date: game.game_date,
        round_name: game.round_name.clone(),
        total_hands_in_game: game.total_hands_in_game,
        recorded_date,
    })
}

/// Replaces a stored game: updates the game row and swaps out all four
/// results atomically. The recorded timestamp is preserved so editing a
/// game does not change its position in same-day ordering.
pub fn replace_game_with_results(
    conn: &mut DbConn,
    game_id: &str,
    game: &ValidGame,
    points: &[f64],
) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "UPDATE games SET game_date = ?1, round_name = ?2, total_hands_in_game = ?3 WHERE id = ?4",
        params![
            game.game_date,
            game.round_name,
            game.total_hands_in_game,
            game_id
        ],
    )
    .context("Failed to update game")?;

    tx.execute(
        "DELETE FROM game_results WHERE game_id = ?1",
        params![game_id],
    )
    .context("Failed to clear previous game results")?;

    insert_results(&tx, game_id, game, points)?;

    tx.commit()?;
    Ok(())
}

fn insert_results(
    tx: &Transaction,
    game_id: &str,
    game: &ValidGame,
    points: &[f64],
) -> Result<()> {
    let sql = "INSERT INTO game_results (game_id, player_id, rank, raw_score, calculated_points, agari_count, riichi_count, houjuu_count, furo_count) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

    for (result, calculated_points) in game.results.iter().zip(points) {
        tx.execute(
            sql,
            params![
                game_id,
                result.player_id,
                result.rank,
                result.raw_score,
                calculated_points,
                result.agari_count,
                result.riichi_count,
                result.houjuu_count,
                result.furo_count
            ],
        )
        .context("Failed to insert game result")?;
    }

    Ok(())
}

pub fn delete_game(conn: &mut DbConn, game_id: &str) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM game_results WHERE game_id = ?1",
        params![game_id],
    )
    .context("Failed to delete game results")?;
    tx.execute("DELETE FROM games WHERE id = ?1", params![game_id])
        .context("Failed to delete game")?;

    tx.commit()?;
    Ok(())
}

pub fn find_game(conn: &mut DbConn, game_id: &str) -> Result<Option<GameRow>> {
    let sql = "SELECT g.id, g.season_id, s.name, g.game_date, g.round_name, g.total_hands_in_game, g.recorded_date FROM games g LEFT JOIN seasons s ON g.season_id = s.id WHERE g.id = ?1";

    conn.query_row(sql, params![game_id], parse_game_row)
        .optional()
        .context("Failed to query game by id")
}

pub fn list_games(conn: &mut DbConn, window: &Window) -> Result<Vec<GameRow>> {
    let (clause, filter_params) = window_filter(window);
    let sql = format!(
        "SELECT g.id, g.season_id, s.name, g.game_date, g.round_name, g.total_hands_in_game, g.recorded_date FROM games g LEFT JOIN seasons s ON g.season_id = s.id {clause} ORDER BY g.game_date DESC, g.recorded_date DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(filter_params), parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_results_for_game(
    conn: &mut DbConn,
    game_id: &str,
) -> Result<Vec<GameResultRow>> {
    let sql = "SELECT gr.game_id, gr.player_id, gr.rank, gr.raw_score, gr.calculated_points, gr.agari_count, gr.riichi_count, gr.houjuu_count, gr.furo_count FROM game_results gr WHERE gr.game_id = ?1 ORDER BY gr.rank";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_game_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// All results belonging to games inside the window, ungrouped; the
/// history view assembles them per game.
pub fn list_game_results(conn: &mut DbConn, window: &Window) -> Result<Vec<GameResultRow>> {
    let (clause, filter_params) = window_filter(window);
    let sql = format!(
        "SELECT gr.game_id, gr.player_id, gr.rank, gr.raw_score, gr.calculated_points, gr.agari_count, gr.riichi_count, gr.houjuu_count, gr.furo_count FROM game_results gr JOIN games g ON gr.game_id = g.id {clause}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(filter_params), parse_game_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Materializes the result-with-game rows the aggregator consumes.
pub fn list_result_rows(conn: &mut DbConn, window: &Window) -> Result<Vec<ResultRow>> {
    let (clause, filter_params) = window_filter(window);
    let sql = format!(
        "SELECT gr.player_id, p.name, p.avatar_url, gr.rank, gr.raw_score, gr.calculated_points, gr.agari_count, gr.riichi_count, gr.houjuu_count, gr.furo_count, g.total_hands_in_game, g.game_date, g.recorded_date FROM game_results gr JOIN games g ON gr.game_id = g.id JOIN players p ON gr.player_id = p.id {clause}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(filter_params), parse_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<GameRow> {
    Ok(GameRow {
        id: row.get(0)?,
        season_id: row.get(1)?,
        season_name: row.get(2)?,
        game_date: row.get(3)?,
        round_name: row.get(4)?,
        total_hands_in_game: row.get(5)?,
        recorded_date: row.get(6)?,
    })
}

fn parse_game_result_row(row: &rusqlite::Row) -> rusqlite::Result<GameResultRow> {
    Ok(GameResultRow {
        game_id: row.get(0)?,
        player_id: row.get(1)?,
        rank: row.get(2)?,
        raw_score: row.get(3)?,
        calculated_points: row.get(4)?,
        agari_count: row.get(5)?,
        riichi_count: row.get(6)?,
        houjuu_count: row.get(7)?,
        furo_count: row.get(8)?,
    })
}

fn parse_result_row(row: &rusqlite::Row) -> rusqlite::Result<ResultRow> {
    Ok(ResultRow {
        player_id: row.get(0)?,
        player_name: row.get(1)?,
        avatar_url: row.get(2)?,
        rank: row.get(3)?,
        raw_score: row.get(4)?,
        calculated_points: row.get(5)?,
        agari_count: row.get(6)?,
        riichi_count: row.get(7)?,
        houjuu_count: row.get(8)?,
        furo_count: row.get(9)?,
        total_hands_in_game: row.get(10)?,
        game_date: row.get(11)?,
        recorded_date: row.get(12)?,
    })
}
