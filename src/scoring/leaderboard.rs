use super::types::PlayerAggregate;

/// Orders aggregates into standings: total points descending, average
/// points descending on ties, stable otherwise. The full qualifying set
/// is returned; pagination is not a concern here.
pub fn build_leaderboard(mut entries: Vec<PlayerAggregate>) -> Vec<PlayerAggregate> {
    entries.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then(b.average_points.total_cmp(&a.average_points))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player: &str, total: f64, average: f64) -> PlayerAggregate {
        PlayerAggregate {
            player_id: player.to_string(),
            player_name: player.to_string(),
            avatar_url: None,
            games_played: 4,
            total_points: total,
            average_points: average,
            average_raw_score: 25_000.0,
            average_rank: 2.5,
            best_raw_score: 40_000,
            rank_counts: [1, 1, 1, 1],
            win_rate: 0.25,
            second_place_rate: 0.25,
            third_place_rate: 0.25,
            fourth_place_rate: 0.25,
            rentai_rate: 0.5,
            rasu_kaihi_rate: 0.75,
            total_agari: 0,
            total_riichi: 0,
            total_houjuu: 0,
            total_furo: 0,
            total_hands: 0,
            agari_rate_per_hand: 0.0,
            riichi_rate_per_hand: 0.0,
            houjuu_rate_per_hand: 0.0,
            furo_rate_per_hand: 0.0,
            last_ten_games_points: vec![],
        }
    }

    #[test]
    fn orders_by_total_points_descending() {
        let standings = build_leaderboard(vec![
            entry("low", -20.0, -5.0),
            entry("high", 55.0, 11.0),
            entry("mid", 10.0, 2.5),
        ]);

        let order: Vec<&str> = standings.iter().map(|e| e.player_id.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn average_points_breaks_ties() {
        let standings = build_leaderboard(vec![
            entry("steady", 30.0, 3.0),
            entry("hot", 30.0, 15.0),
        ]);

        assert_eq!(standings[0].player_id, "hot");
        assert_eq!(standings[1].player_id, "steady");
    }
}
