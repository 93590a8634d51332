use std::collections::HashMap;

use super::types::{PlayerAggregate, ResultRow};

const RECENT_FORM_LENGTH: usize = 10;

/// Computes one aggregate per player appearing in `rows`. Players with no
/// qualifying result simply never show up; they are not zero-filled.
/// Aggregation happens entirely in-process so the numbers do not depend
/// on any query engine's semantics.
pub fn aggregate_players(mut rows: Vec<ResultRow>) -> Vec<PlayerAggregate> {
    sort_by_recency(&mut rows);

    let mut order: Vec<String> = Vec::new();
    let mut accumulators: HashMap<String, Accumulator> = HashMap::new();

    for row in &rows {
        let acc = accumulators
            .entry(row.player_id.clone())
            .or_insert_with(|| {
                order.push(row.player_id.clone());
                Accumulator::new(row)
            });
        acc.absorb(row);
    }

    order
        .into_iter()
        .filter_map(|player_id| {
            accumulators
                .remove(&player_id)
                .map(|acc| acc.finish(player_id))
        })
        .collect()
}

/// Most recent first: game date, then recorded timestamp for same-day
/// games. This is the one recency ordering used everywhere.
pub fn sort_by_recency(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| {
        b.game_date
            .cmp(&a.game_date)
            .then(b.recorded_date.cmp(&a.recorded_date))
    });
}

struct Accumulator {
    player_name: String,
    avatar_url: Option<String>,
    games_played: i64,
    total_points: f64,
    total_raw_score: i64,
    total_rank: i64,
    best_raw_score: Option<i64>,
    rank_counts: [i64; 4],
    total_agari: i64,
    total_riichi: i64,
    total_houjuu: i64,
    total_furo: i64,
    total_hands: i64,
    recent_points: Vec<f64>,
}

impl Accumulator {
    fn new(row: &ResultRow) -> Self {
        Self {
            player_name: row.player_name.clone(),
            avatar_url: row.avatar_url.clone(),
            games_played: 0,
            total_points: 0.0,
            total_raw_score: 0,
            total_rank: 0,
            best_raw_score: None,
            rank_counts: [0; 4],
            total_agari: 0,
            total_riichi: 0,
            total_houjuu: 0,
            total_furo: 0,
            total_hands: 0,
            recent_points: Vec::new(),
        }
    }

    fn absorb(&mut self, row: &ResultRow) {
        self.games_played += 1;
        self.total_points += row.calculated_points;
        self.total_raw_score += row.raw_score;
        self.total_rank += row.rank;
        self.best_raw_score = Some(match self.best_raw_score {
            Some(best) => best.max(row.raw_score),
            None => row.raw_score,
        });

        if let Some(slot) = self.rank_counts.get_mut((row.rank - 1) as usize) {
            *slot += 1;
        }

        self.total_agari += row.agari_count;
        self.total_riichi += row.riichi_count;
        self.total_houjuu += row.houjuu_count;
        self.total_furo += row.furo_count;
        self.total_hands += row.total_hands_in_game.unwrap_or(0);

        // Rows arrive newest first, so the first ten are the recent form.
        if self.recent_points.len() < RECENT_FORM_LENGTH {
            self.recent_points.push(row.calculated_points);
        }
    }

    fn finish(self, player_id: String) -> PlayerAggregate {
        let games = self.games_played as f64;
        let [first, second, third, fourth] = self.rank_counts;

        PlayerAggregate {
            player_id,
            player_name: self.player_name,
            avatar_url: self.avatar_url,
            games_played: self.games_played,
            total_points: self.total_points,
            average_points: self.total_points / games,
            average_raw_score: self.total_raw_score as f64 / games,
            average_rank: self.total_rank as f64 / games,
            best_raw_score: self.best_raw_score.unwrap_or(0),
            rank_counts: self.rank_counts,
            win_rate: first as f64 / games,
            second_place_rate: second as f64 / games,
            third_place_rate: third as f64 / games,
            fourth_place_rate: fourth as f64 / games,
            rentai_rate: (first + second) as f64 / games,
            rasu_kaihi_rate: (first + second + third) as f64 / games,
            total_agari: self.total_agari,
            total_riichi: self.total_riichi,
            total_houjuu: self.total_houjuu,
            total_furo: self.total_furo,
            total_hands: self.total_hands,
            agari_rate_per_hand: per_hand_rate(self.total_agari, self.total_hands),
            riichi_rate_per_hand: per_hand_rate(self.total_riichi, self.total_hands),
            houjuu_rate_per_hand: per_hand_rate(self.total_houjuu, self.total_hands),
            furo_rate_per_hand: per_hand_rate(self.total_furo, self.total_hands),
            last_ten_games_points: self.recent_points,
        }
    }
}

fn per_hand_rate(count: i64, total_hands: i64) -> f64 {
    if total_hands > 0 {
        count as f64 / total_hands as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recorded(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn row(
        player: &str,
        rank: i64,
        raw_score: i64,
        points: f64,
        game_date: NaiveDate,
        recorded_date: NaiveDateTime,
    ) -> ResultRow {
        ResultRow {
            player_id: player.to_string(),
            player_name: player.to_uppercase(),
            avatar_url: None,
            rank,
            raw_score,
            calculated_points: points,
            agari_count: 2,
            riichi_count: 3,
            houjuu_count: 1,
            furo_count: 0,
            total_hands_in_game: Some(10),
            game_date,
            recorded_date,
        }
    }

    #[test]
    fn totals_and_averages() {
        let rows = vec![
            row("alice", 1, 42_000, 37.0, date(2025, 2, 1), recorded(2025, 2, 1, 20)),
            row("alice", 3, 20_000, -15.0, date(2025, 2, 8), recorded(2025, 2, 8, 20)),
        ];

        let aggregates = aggregate_players(rows);

        assert_eq!(aggregates.len(), 1);
        let alice = &aggregates[0];
        assert_eq!(alice.games_played, 2);
        assert_eq!(alice.total_points, 22.0);
        assert_eq!(alice.average_points, 11.0);
        assert_eq!(alice.average_raw_score, 31_000.0);
        assert_eq!(alice.average_rank, 2.0);
        assert_eq!(alice.best_raw_score, 42_000);
        assert_eq!(alice.rank_counts, [1, 0, 1, 0]);
    }

    #[test]
    fn rank_rates_sum_to_one() {
        let rows = vec![
            row("bob", 1, 30_000, 25.0, date(2025, 1, 1), recorded(2025, 1, 1, 19)),
            row("bob", 2, 28_000, 13.0, date(2025, 1, 2), recorded(2025, 1, 2, 19)),
            row("bob", 4, 12_000, -33.0, date(2025, 1, 3), recorded(2025, 1, 3, 19)),
        ];

        let aggregates = aggregate_players(rows);
        let bob = &aggregates[0];

        let rate_sum = bob.win_rate
            + bob.second_place_rate
            + bob.third_place_rate
            + bob.fourth_place_rate;
        assert!((rate_sum - 1.0).abs() < 1e-9);
        assert!((bob.rentai_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((bob.rasu_kaihi_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!(bob.average_rank >= 1.0 && bob.average_rank <= 4.0);
    }

    #[test]
    fn per_hand_rates() {
        let rows = vec![
            row("cho", 2, 30_000, 15.0, date(2025, 1, 1), recorded(2025, 1, 1, 19)),
            row("cho", 1, 38_000, 33.0, date(2025, 1, 5), recorded(2025, 1, 5, 19)),
        ];

        let aggregates = aggregate_players(rows);
        let cho = &aggregates[0];

        assert_eq!(cho.total_hands, 20);
        assert!((cho.agari_rate_per_hand - 4.0 / 20.0).abs() < 1e-9);
        assert!((cho.riichi_rate_per_hand - 6.0 / 20.0).abs() < 1e-9);
        assert!((cho.houjuu_rate_per_hand - 2.0 / 20.0).abs() < 1e-9);
        assert_eq!(cho.furo_rate_per_hand, 0.0);
    }

    #[test]
    fn per_hand_rates_zero_when_hands_unknown() {
        let mut base = row("dee", 1, 40_000, 35.0, date(2025, 1, 1), recorded(2025, 1, 1, 19));
        base.total_hands_in_game = None;

        let aggregates = aggregate_players(vec![base]);
        let dee = &aggregates[0];

        assert_eq!(dee.total_hands, 0);
        assert_eq!(dee.agari_rate_per_hand, 0.0);
        assert_eq!(dee.houjuu_rate_per_hand, 0.0);
    }

    #[test]
    fn recent_form_is_newest_first_and_capped() {
        let mut rows = Vec::new();
        for day in 1..=12 {
            rows.push(row(
                "emi",
                1,
                30_000,
                day as f64,
                date(2025, 3, day),
                recorded(2025, 3, day, 20),
            ));
        }

        let aggregates = aggregate_players(rows);
        let emi = &aggregates[0];

        assert_eq!(emi.games_played, 12);
        assert_eq!(emi.last_ten_games_points.len(), 10);
        // Days 12 down to 3.
        assert_eq!(emi.last_ten_games_points[0], 12.0);
        assert_eq!(emi.last_ten_games_points[9], 3.0);
    }

    #[test]
    fn recorded_date_breaks_same_day_ties() {
        let day = date(2025, 4, 1);
        let rows = vec![
            row("fay", 2, 28_000, 13.0, day, recorded(2025, 4, 1, 18)),
            row("fay", 1, 36_000, 31.0, day, recorded(2025, 4, 1, 22)),
            row("fay", 4, 11_000, -34.0, day, recorded(2025, 4, 1, 20)),
        ];

        let aggregates = aggregate_players(rows);
        let fay = &aggregates[0];

        assert_eq!(fay.last_ten_games_points, vec![31.0, -34.0, 13.0]);
    }

    #[test]
    fn recent_form_length_tracks_games_played_when_short() {
        let rows = vec![
            row("gil", 3, 22_000, -13.0, date(2025, 5, 2), recorded(2025, 5, 2, 20)),
            row("gil", 2, 29_000, 14.0, date(2025, 5, 9), recorded(2025, 5, 9, 20)),
        ];

        let aggregates = aggregate_players(rows);
        let gil = &aggregates[0];

        assert_eq!(
            gil.last_ten_games_points.len(),
            gil.games_played.min(10) as usize
        );
    }

    #[test]
    fn players_without_results_are_absent() {
        let rows = vec![row(
            "hana",
            1,
            40_000,
            35.0,
            date(2025, 6, 1),
            recorded(2025, 6, 1, 21),
        )];

        let aggregates = aggregate_players(rows);

        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].player_id, "hana");
    }
}
