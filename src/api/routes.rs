use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{games, players, seasons, settings, standings, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/seasons", get(seasons::list_seasons).post(seasons::create_season))
        .route("/api/seasons/active", get(seasons::get_active_season))
        .route(
            "/api/seasons/:id",
            get(seasons::get_season).put(seasons::update_season),
        )
        .route("/api/seasons/:id/activate", post(seasons::activate_season))
        .route(
            "/api/seasons/:id/settings",
            get(settings::get_league_settings).put(settings::update_league_settings),
        )
        .route(
            "/api/seasons/:id/games",
            get(games::list_season_games).post(games::create_game),
        )
        .route(
            "/api/seasons/:id/standings",
            get(standings::get_season_standings),
        )
        .route(
            "/api/players",
            get(players::list_players).post(players::create_player),
        )
        .route(
            "/api/players/:id",
            put(players::update_player).delete(players::delete_player),
        )
        .route(
            "/api/players/:id/can-delete",
            get(players::check_player_can_delete),
        )
        .route("/api/games/all", get(games::list_all_games))
        .route("/api/games/daily", get(games::list_daily_games))
        .route("/api/games/date-range", get(games::list_games_by_date_range))
        .route(
            "/api/games/:id",
            get(games::get_game_detail)
                .put(games::update_game)
                .delete(games::delete_game),
        )
        .route("/api/standings/all", get(standings::get_all_standings))
        .route("/api/standings/daily", get(standings::get_daily_standings))
        .route(
            "/api/standings/date-range",
            get(standings::get_date_range_standings),
        )
        .with_state(state)
}
