use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::database::models::{Player, Season, SeasonSummary};
use crate::scoring::types::{GameRecord, GameResultRow, PlayerAggregate, ScoringRule};

/// Unified response envelope; errors use the same shape with
/// `success: false`.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created<T> {
    pub id: T,
    pub message: String,
}

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// --- Seasons ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDto {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub description: Option<String>,
    pub game_count: i64,
    pub player_count: i64,
    pub created_date: Option<NaiveDateTime>,
}

impl SeasonDto {
    pub fn from_season(season: Season, summary: SeasonSummary) -> Self {
        Self {
            id: season.id,
            name: season.name,
            start_date: season.start_date,
            end_date: season.end_date,
            is_active: season.is_active,
            description: season.description,
            game_count: summary.game_count,
            player_count: summary.player_count,
            created_date: season.created_date,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonCreate {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonUpdate {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

// --- Players ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_date: Option<NaiveDateTime>,
}

impl From<Player> for PlayerDto {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            avatar_url: player.avatar_url,
            created_date: player.created_date,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCreate {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanDelete {
    pub can_delete: bool,
    pub game_count: i64,
    pub reason: Option<String>,
}

// --- League settings ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettingsDto {
    pub game_start_chip_count: i64,
    pub calculation_base_chip_count: i64,
    pub uma_points: BTreeMap<u8, i64>,
}

impl LeagueSettingsDto {
    pub fn from_rule(rule: &ScoringRule) -> Self {
        let uma = rule.uma_table();
        let uma_points = (1u8..=4).zip(uma).collect();
        Self {
            game_start_chip_count: rule.start_chip_count,
            calculation_base_chip_count: rule.baseline_chip_count,
            uma_points,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettingsWrite {
    pub game_start_chip_count: Option<i64>,
    pub calculation_base_chip_count: Option<i64>,
    pub uma_points: Option<BTreeMap<u8, i64>>,
}

// --- Games ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameWrite {
    pub game_date: Option<String>,
    pub round_name: Option<String>,
    pub total_hands_in_game: Option<i64>,
    #[serde(default)]
    pub game_results: Vec<GameResultWrite>,
}

/// The submitted `calculatedPoints` is accepted for shape compatibility
/// but the stored value is always recomputed from rank and raw score.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResultWrite {
    pub player_id: Option<String>,
    pub raw_score: i64,
    pub rank: i64,
    #[serde(default)]
    pub calculated_points: Option<f64>,
    #[serde(default)]
    pub agari_count: i64,
    #[serde(default)]
    pub riichi_count: i64,
    #[serde(default)]
    pub houjuu_count: i64,
    #[serde(default)]
    pub furo_count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResultDto {
    pub player_id: String,
    pub raw_score: i64,
    pub rank: i64,
    pub calculated_points: f64,
    pub agari_count: i64,
    pub riichi_count: i64,
    pub houjuu_count: i64,
    pub furo_count: i64,
}

impl From<GameResultRow> for GameResultDto {
    fn from(row: GameResultRow) -> Self {
        Self {
            player_id: row.player_id,
            raw_score: row.raw_score,
            rank: row.rank,
            calculated_points: row.calculated_points,
            agari_count: row.agari_count,
            riichi_count: row.riichi_count,
            houjuu_count: row.houjuu_count,
            furo_count: row.furo_count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: String,
    pub season_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_name: Option<String>,
    pub game_date: NaiveDate,
    pub round_name: Option<String>,
    pub total_hands_in_game: Option<i64>,
    pub recorded_date: NaiveDateTime,
    pub results: Vec<GameResultDto>,
}

impl GameDto {
    pub fn from_record(record: GameRecord, include_season_name: bool) -> Self {
        let game = record.game;
        Self {
            id: game.id,
            season_id: game.season_id,
            season_name: if include_season_name {
                game.season_name
            } else {
                None
            },
            game_date: game.game_date,
            round_name: game.round_name,
            total_hands_in_game: game.total_hands_in_game,
            recorded_date: game.recorded_date,
            results: record.results.into_iter().map(GameResultDto::from).collect(),
        }
    }
}

// --- Standings ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub player: PlayerRef,
    pub games_played: i64,
    pub total_points: f64,
    pub average_points: f64,
    pub average_raw_score: f64,
    pub average_rank: f64,
    pub best_raw_score: i64,
    pub rank_distribution: BTreeMap<u8, i64>,
    pub win_rate: f64,
    pub second_place_rate: f64,
    pub third_place_rate: f64,
    pub fourth_place_rate: f64,
    pub rentai_rate: f64,
    pub rasu_kaihi_rate: f64,
    pub total_agari_count: i64,
    pub total_riichi_count: i64,
    pub total_houjuu_count: i64,
    pub total_furo_count: i64,
    pub total_hands_played_in: i64,
    pub agari_rate_per_hand: f64,
    pub riichi_rate_per_hand: f64,
    pub houjuu_rate_per_hand: f64,
    pub furo_rate_per_hand: f64,
    pub last_ten_games_points: Vec<f64>,
}

impl From<PlayerAggregate> for StandingsEntry {
    fn from(aggregate: PlayerAggregate) -> Self {
        let rank_distribution = (1u8..=4).zip(aggregate.rank_counts).collect();
        Self {
            player: PlayerRef {
                id: aggregate.player_id,
                name: aggregate.player_name,
                avatar_url: aggregate.avatar_url,
            },
            games_played: aggregate.games_played,
            total_points: aggregate.total_points,
            average_points: aggregate.average_points,
            average_raw_score: aggregate.average_raw_score,
            average_rank: aggregate.average_rank,
            best_raw_score: aggregate.best_raw_score,
            rank_distribution,
            win_rate: aggregate.win_rate,
            second_place_rate: aggregate.second_place_rate,
            third_place_rate: aggregate.third_place_rate,
            fourth_place_rate: aggregate.fourth_place_rate,
            rentai_rate: aggregate.rentai_rate,
            rasu_kaihi_rate: aggregate.rasu_kaihi_rate,
            total_agari_count: aggregate.total_agari,
            total_riichi_count: aggregate.total_riichi,
            total_houjuu_count: aggregate.total_houjuu,
            total_furo_count: aggregate.total_furo,
            total_hands_played_in: aggregate.total_hands,
            agari_rate_per_hand: aggregate.agari_rate_per_hand,
            riichi_rate_per_hand: aggregate.riichi_rate_per_hand,
            houjuu_rate_per_hand: aggregate.houjuu_rate_per_hand,
            furo_rate_per_hand: aggregate.furo_rate_per_hand,
            last_ten_games_points: aggregate.last_ten_games_points,
        }
    }
}
