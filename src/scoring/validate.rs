use std::collections::HashSet;

use chrono::NaiveDate;

use crate::errors::AppError;

use super::points::{ensure_rank_permutation, RESULTS_PER_GAME};

/// A game submission as received from the outside, before validation.
/// The date arrives as text and is parsed here so a malformed value is
/// reported as a validation failure.
#[derive(Debug, Clone)]
pub struct GameSubmission {
    pub game_date: String,
    pub round_name: Option<String>,
    pub total_hands_in_game: Option<i64>,
    pub results: Vec<ResultSubmission>,
}

#[derive(Debug, Clone)]
pub struct ResultSubmission {
    pub player_id: String,
    pub rank: i64,
    pub raw_score: i64,
    pub agari_count: i64,
    pub riichi_count: i64,
    pub houjuu_count: i64,
    pub furo_count: i64,
}

/// A structurally valid game, ready for point calculation and persistence.
#[derive(Debug, Clone)]
pub struct ValidGame {
    pub game_date: NaiveDate,
    pub round_name: Option<String>,
    pub total_hands_in_game: Option<i64>,
    pub results: Vec<ResultSubmission>,
}

impl ValidGame {
    /// The `(rank, raw_score)` pairs in submission order, as consumed by
    /// the point calculation.
    pub fn rank_score_pairs(&self) -> Vec<(i64, i64)> {
        self.results
            .iter()
            .map(|r| (r.rank, r.raw_score))
            .collect()
    }
}

/// Validates a submission fail-fast: the returned error names the first
/// violated constraint. Player existence is the caller's concern since it
/// requires store access.
pub fn validate_submission(submission: GameSubmission) -> Result<ValidGame, AppError> {
    let game_date = parse_game_date(&submission.game_date)?;

    if submission.results.len() != RESULTS_PER_GAME {
        return Err(AppError::validation(format!(
            "Exactly {RESULTS_PER_GAME} players required, got {}",
            submission.results.len()
        )));
    }

    let mut seen_players = HashSet::new();
    for result in &submission.results {
        if result.player_id.is_empty() {
            return Err(AppError::validation("Result is missing a player id"));
        }
        if !seen_players.insert(result.player_id.as_str()) {
            return Err(AppError::validation(format!(
                "Player {} appears more than once",
                result.player_id
            )));
        }
    }

    let ranks: Vec<i64> = submission.results.iter().map(|r| r.rank).collect();
    ensure_rank_permutation(&ranks)?;

    if let Some(hands) = submission.total_hands_in_game {
        if hands < 0 {
            return Err(AppError::validation(format!(
                "Total hands in game must be non-negative, got {hands}"
            )));
        }
    }

    for result in &submission.results {
        validate_counters(result, submission.total_hands_in_game)?;
    }

    Ok(ValidGame {
        game_date,
        round_name: submission.round_name,
        total_hands_in_game: submission.total_hands_in_game,
        results: submission.results,
    })
}

fn parse_game_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("Invalid game date '{raw}', expected YYYY-MM-DD"))
    })
}

fn validate_counters(
    result: &ResultSubmission,
    total_hands: Option<i64>,
) -> Result<(), AppError> {
    let counters = [
        ("agariCount", result.agari_count),
        ("riichiCount", result.riichi_count),
        ("houjuuCount", result.houjuu_count),
        ("furoCount", result.furo_count),
    ];

    for (name, value) in counters {
        if value < 0 {
            return Err(AppError::validation(format!(
                "{name} must be non-negative for player {}, got {value}",
                result.player_id
            )));
        }
        if let Some(hands) = total_hands {
            if value > hands {
                return Err(AppError::validation(format!(
                    "{name} ({value}) exceeds total hands in game ({hands}) for player {}",
                    result.player_id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(player_id: &str, rank: i64) -> ResultSubmission {
        ResultSubmission {
            player_id: player_id.to_string(),
            rank,
            raw_score: 25_000,
            agari_count: 2,
            riichi_count: 1,
            houjuu_count: 0,
            furo_count: 3,
        }
    }

    fn submission() -> GameSubmission {
        GameSubmission {
            game_date: "2025-03-14".to_string(),
            round_name: Some("East round".to_string()),
            total_hands_in_game: Some(8),
            results: vec![
                result("p1", 1),
                result("p2", 2),
                result("p3", 3),
                result("p4", 4),
            ],
        }
    }

    #[test]
    fn accepts_well_formed_submission() {
        let valid = validate_submission(submission()).unwrap();

        assert_eq!(valid.game_date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(valid.results.len(), 4);
        assert_eq!(
            valid.rank_score_pairs(),
            vec![(1, 25_000), (2, 25_000), (3, 25_000), (4, 25_000)]
        );
    }

    #[test]
    fn rejects_malformed_date() {
        let mut sub = submission();
        sub.game_date = "14/03/2025".to_string();

        assert!(validate_submission(sub).is_err());
    }

    #[test]
    fn rejects_fewer_than_four_results() {
        let mut sub = submission();
        sub.results.pop();

        assert!(validate_submission(sub).is_err());
    }

    #[test]
    fn rejects_repeated_player() {
        let mut sub = submission();
        sub.results[3] = result("p1", 4);

        assert!(validate_submission(sub).is_err());
    }

    #[test]
    fn rejects_broken_rank_permutation() {
        let mut sub = submission();
        sub.results[1] = result("p2", 1);

        assert!(validate_submission(sub).is_err());
    }

    #[test]
    fn rejects_negative_counter() {
        let mut sub = submission();
        sub.results[0].riichi_count = -1;

        assert!(validate_submission(sub).is_err());
    }

    #[test]
    fn rejects_counter_exceeding_hands() {
        let mut sub = submission();
        sub.results[2].furo_count = 9;

        assert!(validate_submission(sub).is_err());
    }

    #[test]
    fn counters_unconstrained_without_hand_count() {
        let mut sub = submission();
        sub.total_hands_in_game = None;
        sub.results[2].furo_count = 40;

        assert!(validate_submission(sub).is_ok());
    }
}
