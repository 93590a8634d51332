use std::collections::HashMap;

use super::types::{GameRecord, GameResultRow, GameRow};

/// Assembles per-game detail records: each qualifying game with its four
/// results attached, most recent first. Result completeness is enforced at
/// write time, so nothing is filtered here.
pub fn build_history(
    mut games: Vec<GameRow>,
    results: Vec<GameResultRow>,
) -> Vec<GameRecord> {
    let mut by_game: HashMap<String, Vec<GameResultRow>> = HashMap::new();
    for result in results {
        by_game.entry(result.game_id.clone()).or_default().push(result);
    }

    games.sort_by(|a, b| {
        b.game_date
            .cmp(&a.game_date)
            .then(b.recorded_date.cmp(&a.recorded_date))
    });

    games
        .into_iter()
        .map(|game| {
            let mut game_results = by_game.remove(&game.id).unwrap_or_default();
            game_results.sort_by_key(|r| r.rank);
            GameRecord {
                game,
                results: game_results,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn game(id: &str, date: (i32, u32, u32), recorded_hour: u32) -> GameRow {
        let game_date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        GameRow {
            id: id.to_string(),
            season_id: 1,
            season_name: Some("Season 1".to_string()),
            game_date,
            round_name: None,
            total_hands_in_game: Some(8),
            recorded_date: game_date.and_hms_opt(recorded_hour, 0, 0).unwrap(),
        }
    }

    fn result(game_id: &str, player: &str, rank: i64) -> GameResultRow {
        GameResultRow {
            game_id: game_id.to_string(),
            player_id: player.to_string(),
            rank,
            raw_score: 25_000,
            calculated_points: 0.0,
            agari_count: 0,
            riichi_count: 0,
            houjuu_count: 0,
            furo_count: 0,
        }
    }

    #[test]
    fn games_come_back_newest_first() {
        let games = vec![
            game("g1", (2025, 1, 5), 20),
            game("g2", (2025, 1, 9), 20),
            game("g3", (2025, 1, 7), 20),
        ];

        let history = build_history(games, vec![]);

        let order: Vec<&str> = history.iter().map(|r| r.game.id.as_str()).collect();
        assert_eq!(order, vec!["g2", "g3", "g1"]);
    }

    #[test]
    fn recorded_date_orders_same_day_games() {
        let games = vec![
            game("early", (2025, 2, 1), 14),
            game("late", (2025, 2, 1), 23),
        ];

        let history = build_history(games, vec![]);

        assert_eq!(history[0].game.id, "late");
        assert_eq!(history[1].game.id, "early");
    }

    #[test]
    fn results_attach_to_their_game_ordered_by_rank() {
        let games = vec![game("g1", (2025, 3, 1), 20), game("g2", (2025, 3, 2), 20)];
        let results = vec![
            result("g1", "d", 4),
            result("g2", "a", 1),
            result("g1", "b", 2),
            result("g1", "a", 1),
            result("g1", "c", 3),
            result("g2", "b", 2),
            result("g2", "c", 3),
            result("g2", "d", 4),
        ];

        let history = build_history(games, results);

        assert_eq!(history[0].game.id, "g2");
        assert_eq!(history[0].results.len(), 4);
        let ranks: Vec<i64> = history[1].results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }
}
