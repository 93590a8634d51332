use axum::extract::{Path, Query, State};
use axum::Json;
use std::sync::Arc;

use crate::api::models::{Created, Envelope, GameDto, GameWrite, Message};
use crate::database::{self, get_connection, DbConn};
use crate::errors::AppError;
use crate::scoring::{
    self, calculate_points, validate_submission, GameSubmission, ResultSubmission,
    ScoringRule, ValidGame, Window,
};

use super::{daily_window, range_window, scoring_rule, AppState, DateParam, DateRangeParams};

/// Normalizes and validates a write payload, confirms every referenced
/// player exists, and recomputes the four calculated points under the
/// season's rule.
fn prepare_game(
    conn: &mut DbConn,
    body: GameWrite,
    rule: &ScoringRule,
) -> Result<(ValidGame, Vec<f64>), AppError> {
    let game_date = body
        .game_date
        .ok_or_else(|| AppError::validation("gameDate is required"))?;

    let results = body
        .game_results
        .into_iter()
        .map(|result| ResultSubmission {
            player_id: result.player_id.unwrap_or_default(),
            rank: result.rank,
            raw_score: result.raw_score,
            agari_count: result.agari_count,
            riichi_count: result.riichi_count,
            houjuu_count: result.houjuu_count,
            furo_count: result.furo_count,
        })
        .collect();

    let valid = validate_submission(GameSubmission {
        game_date,
        round_name: body.round_name,
        total_hands_in_game: body.total_hands_in_game,
        results,
    })?;

    for result in &valid.results {
        database::players::find_by_id(conn, &result.player_id)?.ok_or_else(|| {
            AppError::NotFound(format!("Player {} not found", result.player_id))
        })?;
    }

    let points = calculate_points(rule, &valid.rank_score_pairs())?;
    Ok((valid, points))
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
    Json(body): Json<GameWrite>,
) -> Result<Json<Envelope<Created<String>>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::seasons::find_by_id(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("Season"))?;
    let settings = database::settings::find_for_season(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("League settings"))?;

    let rule = scoring_rule(&settings, &state.config.scoring);
    let (valid, points) = prepare_game(&mut conn, body, &rule)?;

    let game =
        database::games::insert_game_with_results(&mut conn, season_id, &valid, &points)?;

    Ok(Json(Envelope::ok(Created {
        id: game.id,
        message: "Game recorded successfully".to_string(),
    })))
}

pub async fn update_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Json(body): Json<GameWrite>,
) -> Result<Json<Envelope<Message>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let existing = database::games::find_game(&mut conn, &game_id)?
        .ok_or_else(|| AppError::not_found("Game"))?;
    let settings = database::settings::find_for_season(&mut conn, existing.season_id)?
        .ok_or_else(|| AppError::not_found("League settings"))?;

    let rule = scoring_rule(&settings, &state.config.scoring);
    let (valid, points) = prepare_game(&mut conn, body, &rule)?;

    database::games::replace_game_with_results(&mut conn, &game_id, &valid, &points)?;

    Ok(Json(Envelope::ok(Message::new("Game updated successfully"))))
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<Envelope<Message>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::games::find_game(&mut conn, &game_id)?
        .ok_or_else(|| AppError::not_found("Game"))?;

    database::games::delete_game(&mut conn, &game_id)?;

    Ok(Json(Envelope::ok(Message::new("Game deleted successfully"))))
}

pub async fn get_game_detail(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<Envelope<GameDto>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let game = database::games::find_game(&mut conn, &game_id)?
        .ok_or_else(|| AppError::not_found("Game"))?;
    let results = database::games::list_results_for_game(&mut conn, &game_id)?;

    let record = scoring::GameRecord { game, results };
    Ok(Json(Envelope::ok(GameDto::from_record(record, true))))
}

fn history_for_window(
    conn: &mut DbConn,
    window: &Window,
    include_season_name: bool,
) -> Result<Vec<GameDto>, AppError> {
    let games = database::games::list_games(conn, window)?;
    let results = database::games::list_game_results(conn, window)?;

    let history = scoring::build_history(games, results);
    Ok(history
        .into_iter()
        .map(|record| GameDto::from_record(record, include_season_name))
        .collect())
}

pub async fn list_season_games(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
) -> Result<Json<Envelope<Vec<GameDto>>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::seasons::find_by_id(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("Season"))?;

    let games = history_for_window(&mut conn, &Window::Season(season_id), false)?;
    Ok(Json(Envelope::ok(games)))
}

pub async fn list_all_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<GameDto>>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let games = history_for_window(&mut conn, &Window::AllTime, true)?;
    Ok(Json(Envelope::ok(games)))
}

pub async fn list_daily_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateParam>,
) -> Result<Json<Envelope<Vec<GameDto>>>, AppError> {
    let window = daily_window(&params)?;
    let mut conn = get_connection(&state.pool)?;

    let games = history_for_window(&mut conn, &window, true)?;
    Ok(Json(Envelope::ok(games)))
}

pub async fn list_games_by_date_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<Envelope<Vec<GameDto>>>, AppError> {
    let window = range_window(&params)?;
    let mut conn = get_connection(&state.pool)?;

    let games = history_for_window(&mut conn, &window, true)?;
    Ok(Json(Envelope::ok(games)))
}
