use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::api::models::{Created, Envelope, Message, SeasonCreate, SeasonDto, SeasonUpdate};
use crate::database::models::SeasonPatch;
use crate::database::{self, get_connection};
use crate::errors::AppError;

use super::{parse_date, AppState};

pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<SeasonDto>>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let seasons = database::seasons::list_all(&mut conn)?;
    let summaries = database::seasons::summaries(&mut conn)?;

    let dtos = seasons
        .into_iter()
        .map(|season| {
            let summary = summaries.get(&season.id).copied().unwrap_or_default();
            SeasonDto::from_season(season, summary)
        })
        .collect();

    Ok(Json(Envelope::ok(dtos)))
}

pub async fn get_active_season(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<SeasonDto>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let season = database::seasons::find_active(&mut conn)?
        .ok_or_else(|| AppError::NotFound("No active season found".to_string()))?;
    let summary = database::seasons::summaries(&mut conn)?
        .get(&season.id)
        .copied()
        .unwrap_or_default();

    Ok(Json(Envelope::ok(SeasonDto::from_season(season, summary))))
}

pub async fn get_season(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
) -> Result<Json<Envelope<SeasonDto>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let season = database::seasons::find_by_id(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("Season"))?;
    let summary = database::seasons::summaries(&mut conn)?
        .get(&season.id)
        .copied()
        .unwrap_or_default();

    Ok(Json(Envelope::ok(SeasonDto::from_season(season, summary))))
}

pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SeasonCreate>,
) -> Result<Json<Envelope<Created<i64>>>, AppError> {
    let name = body
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name and startDate are required"))?;
    let start_raw = body
        .start_date
        .as_deref()
        .ok_or_else(|| AppError::validation("Name and startDate are required"))?;

    let start_date = parse_date(start_raw, "startDate")?;
    let end_date = body
        .end_date
        .as_deref()
        .map(|raw| parse_date(raw, "endDate"))
        .transpose()?;

    let mut conn = get_connection(&state.pool)?;

    if database::seasons::find_by_name(&mut conn, name)?.is_some() {
        return Err(AppError::conflict("Season name already exists"));
    }

    let season = database::seasons::create_season(
        &mut conn,
        name,
        start_date,
        end_date,
        body.is_active,
        body.description.as_deref(),
        &state.config.scoring,
    )?;

    if body.is_active {
        // Creation marked the season active; enforce exclusivity.
        database::seasons::set_active(&mut conn, season.id)?;
    }

    Ok(Json(Envelope::ok(Created {
        id: season.id,
        message: "Season created successfully".to_string(),
    })))
}

pub async fn update_season(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
    Json(body): Json<SeasonUpdate>,
) -> Result<Json<Envelope<Message>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::seasons::find_by_id(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("Season"))?;

    let patch = SeasonPatch {
        name: body.name,
        start_date: body
            .start_date
            .as_deref()
            .map(|raw| parse_date(raw, "startDate"))
            .transpose()?,
        end_date: body
            .end_date
            .as_deref()
            .map(|raw| parse_date(raw, "endDate"))
            .transpose()?,
        description: body.description,
        is_active: body.is_active,
    };

    if patch.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    if let Some(name) = &patch.name {
        if let Some(existing) = database::seasons::find_by_name(&mut conn, name)? {
            if existing.id != season_id {
                return Err(AppError::conflict("Season name already exists"));
            }
        }
    }

    database::seasons::update_season(&mut conn, season_id, &patch)?;

    Ok(Json(Envelope::ok(Message::new("Season updated successfully"))))
}

pub async fn activate_season(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
) -> Result<Json<Envelope<Message>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::seasons::find_by_id(&mut conn, season_id)?
        .ok_or_else(|| AppError::not_found("Season"))?;

    database::seasons::set_active(&mut conn, season_id)?;

    Ok(Json(Envelope::ok(Message::new(
        "Season activated successfully",
    ))))
}
