use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::api::models::{Envelope, LeagueSettingsDto, LeagueSettingsWrite, Message};
use crate::database::models::LeagueSettingsUpdate;
use crate::database::{self, get_connection};
use crate::errors::AppError;

use super::{scoring_rule, AppState};

pub async fn get_league_settings(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
) -> Result<Json<Envelope<LeagueSettingsDto>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let row = database::settings::find_for_season(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("League settings"))?;

    let rule = scoring_rule(&row, &state.config.scoring);
    Ok(Json(Envelope::ok(LeagueSettingsDto::from_rule(&rule))))
}

pub async fn update_league_settings(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
    Json(body): Json<LeagueSettingsWrite>,
) -> Result<Json<Envelope<Message>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::seasons::find_by_id(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("Season"))?;

    // Fields left out fall back to the league defaults; the rank-4 uma is
    // derived, so only ranks 1-3 are ever stored.
    let defaults = &state.config.scoring;
    let uma = body.uma_points.unwrap_or_default();

    let update = LeagueSettingsUpdate {
        game_start_chip_count: body
            .game_start_chip_count
            .unwrap_or(defaults.game_start_chip_count),
        calculation_base_chip_count: body
            .calculation_base_chip_count
            .unwrap_or(defaults.calculation_base_chip_count),
        uma_1st: uma.get(&1).copied().unwrap_or(defaults.uma[0]),
        uma_2nd: uma.get(&2).copied().unwrap_or(defaults.uma[1]),
        uma_3rd: uma.get(&3).copied().unwrap_or(defaults.uma[2]),
    };

    database::settings::update_for_season(&mut conn, season_id, &update)?;

    Ok(Json(Envelope::ok(Message::new(
        "League settings updated successfully",
    ))))
}
