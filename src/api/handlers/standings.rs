use axum::extract::{Path, Query, State};
use axum::Json;
use std::sync::Arc;

use crate::api::models::{Envelope, StandingsEntry};
use crate::database::{self, get_connection, DbConn};
use crate::errors::AppError;
use crate::scoring::{aggregate_players, build_leaderboard, Window};

use super::{daily_window, range_window, AppState, DateParam, DateRangeParams};

fn standings_for_window(
    conn: &mut DbConn,
    window: &Window,
) -> Result<Vec<StandingsEntry>, AppError> {
    let rows = database::games::list_result_rows(conn, window)?;
    let aggregates = aggregate_players(rows);
    let standings = build_leaderboard(aggregates);

    Ok(standings.into_iter().map(StandingsEntry::from).collect())
}

pub async fn get_season_standings(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
) -> Result<Json<Envelope<Vec<StandingsEntry>>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::seasons::find_by_id(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("Season"))?;

    let standings = standings_for_window(&mut conn, &Window::Season(season_id))?;
    Ok(Json(Envelope::ok(standings)))
}

pub async fn get_all_standings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<StandingsEntry>>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let standings = standings_for_window(&mut conn, &Window::AllTime)?;
    Ok(Json(Envelope::ok(standings)))
}

pub async fn get_daily_standings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateParam>,
) -> Result<Json<Envelope<Vec<StandingsEntry>>>, AppError> {
    let window = daily_window(&params)?;
    let mut conn = get_connection(&state.pool)?;

    let standings = standings_for_window(&mut conn, &window)?;
    Ok(Json(Envelope::ok(standings)))
}

pub async fn get_date_range_standings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<Envelope<Vec<StandingsEntry>>>, AppError> {
    let window = range_window(&params)?;
    let mut conn = get_connection(&state.pool)?;

    let standings = standings_for_window(&mut conn, &window)?;
    Ok(Json(Envelope::ok(standings)))
}
