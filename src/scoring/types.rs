use chrono::{NaiveDate, NaiveDateTime};

/// Per-season scoring configuration. The rank-4 uma is always derived so
/// the table sums to zero across the four ranks.
#[derive(Debug, Clone)]
pub struct ScoringRule {
    pub start_chip_count: i64,
    pub baseline_chip_count: i64,
    pub uma: [i64; 3],
    /// Chips per point unit; raw-score differences against the baseline
    /// are divided by this before uma is applied.
    pub points_per_unit: f64,
}

impl ScoringRule {
    pub fn new(
        start_chip_count: i64,
        baseline_chip_count: i64,
        uma: [i64; 3],
        points_per_unit: f64,
    ) -> Self {
        Self {
            start_chip_count,
            baseline_chip_count,
            uma,
            points_per_unit,
        }
    }

    /// The full uma table for ranks 1-4, with the 4th value derived.
    pub fn uma_table(&self) -> [i64; 4] {
        let [first, second, third] = self.uma;
        [first, second, third, -(first + second + third)]
    }
}

/// One game result joined with its owning game, the unit the aggregator
/// consumes.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub player_id: String,
    pub player_name: String,
    pub avatar_url: Option<String>,
    pub rank: i64,
    pub raw_score: i64,
    pub calculated_points: f64,
    pub agari_count: i64,
    pub riichi_count: i64,
    pub houjuu_count: i64,
    pub furo_count: i64,
    pub total_hands_in_game: Option<i64>,
    pub game_date: NaiveDate,
    pub recorded_date: NaiveDateTime,
}

/// A stored game row, optionally carrying its season's name when the
/// listing spans seasons.
#[derive(Debug, Clone)]
pub struct GameRow {
    pub id: String,
    pub season_id: i64,
    pub season_name: Option<String>,
    pub game_date: NaiveDate,
    pub round_name: Option<String>,
    pub total_hands_in_game: Option<i64>,
    pub recorded_date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct GameResultRow {
    pub game_id: String,
    pub player_id: String,
    pub rank: i64,
    pub raw_score: i64,
    pub calculated_points: f64,
    pub agari_count: i64,
    pub riichi_count: i64,
    pub houjuu_count: i64,
    pub furo_count: i64,
}

/// A game with its four results attached, as served by the history view.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub game: GameRow,
    pub results: Vec<GameResultRow>,
}

/// Aggregated statistics for one player over a window.
#[derive(Debug, Clone)]
pub struct PlayerAggregate {
    pub player_id: String,
    pub player_name: String,
    pub avatar_url: Option<String>,
    pub games_played: i64,
    pub total_points: f64,
    pub average_points: f64,
    pub average_raw_score: f64,
    pub average_rank: f64,
    /// Highest raw score over the window; 0 when no game qualifies,
    /// matching the historical reporting convention.
    pub best_raw_score: i64,
    /// Finishes per rank, index 0 = 1st place.
    pub rank_counts: [i64; 4],
    pub win_rate: f64,
    pub second_place_rate: f64,
    pub third_place_rate: f64,
    pub fourth_place_rate: f64,
    pub rentai_rate: f64,
    pub rasu_kaihi_rate: f64,
    pub total_agari: i64,
    pub total_riichi: i64,
    pub total_houjuu: i64,
    pub total_furo: i64,
    pub total_hands: i64,
    pub agari_rate_per_hand: f64,
    pub riichi_rate_per_hand: f64,
    pub houjuu_rate_per_hand: f64,
    pub furo_rate_per_hand: f64,
    /// Calculated points of the most recent games, newest first,
    /// capped at ten.
    pub last_ten_games_points: Vec<f64>,
}
