use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::api::models::{CanDelete, Created, Envelope, Message, PlayerCreate, PlayerDto, PlayerUpdate};
use crate::database::models::PlayerPatch;
use crate::database::{self, get_connection};
use crate::errors::AppError;

use super::AppState;

pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<PlayerDto>>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let players = database::players::list_all(&mut conn)?;
    let dtos = players.into_iter().map(PlayerDto::from).collect();

    Ok(Json(Envelope::ok(dtos)))
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlayerCreate>,
) -> Result<Json<Envelope<Created<String>>>, AppError> {
    let name = body
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name is required"))?;

    let mut conn = get_connection(&state.pool)?;
    let player =
        database::players::create_player(&mut conn, name, body.avatar_url.as_deref())?;

    Ok(Json(Envelope::ok(Created {
        id: player.id,
        message: "Player created successfully".to_string(),
    })))
}

pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
    Json(body): Json<PlayerUpdate>,
) -> Result<Json<Envelope<Message>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::players::find_by_id(&mut conn, &player_id)?
        .ok_or_else(|| AppError::not_found("Player"))?;

    let patch = PlayerPatch {
        name: body.name,
        avatar_url: body.avatar_url,
    };

    if patch.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    database::players::update_player(&mut conn, &player_id, &patch)?;

    Ok(Json(Envelope::ok(Message::new("Player updated successfully"))))
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<Json<Envelope<Message>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    let player = database::players::find_by_id(&mut conn, &player_id)?
        .ok_or_else(|| AppError::not_found("Player"))?;

    // History across all seasons blocks deletion, without exception.
    let game_count = database::players::count_results_for_player(&mut conn, &player_id)?;
    if game_count > 0 {
        return Err(AppError::conflict(format!(
            "Player \"{}\" cannot be deleted: {game_count} recorded games across all seasons",
            player.name
        )));
    }

    database::players::delete_player(&mut conn, &player_id)?;

    Ok(Json(Envelope::ok(Message::new(format!(
        "Player \"{}\" deleted",
        player.name
    )))))
}

pub async fn check_player_can_delete(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<Json<Envelope<CanDelete>>, AppError> {
    let mut conn = get_connection(&state.pool)?;

    database::players::find_by_id(&mut conn, &player_id)?
        .ok_or_else(|| AppError::not_found("Player"))?;

    let game_count = database::players::count_results_for_player(&mut conn, &player_id)?;
    let can_delete = game_count == 0;

    Ok(Json(Envelope::ok(CanDelete {
        can_delete,
        game_count,
        reason: if can_delete {
            None
        } else {
            Some(format!(
                "Player has {game_count} recorded games across all seasons"
            ))
        },
    })))
}
