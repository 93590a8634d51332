use crate::errors::AppError;

use super::types::ScoringRule;

pub const RESULTS_PER_GAME: usize = 4;

/// Maps four `(rank, raw_score)` pairs to calculated points,
/// order-preserving: `(raw - baseline) / points_per_unit + uma[rank]`.
/// The output sums to zero whenever the uma table does, which the derived
/// rank-4 uma guarantees.
pub fn calculate_points(
    rule: &ScoringRule,
    entries: &[(i64, i64)],
) -> Result<Vec<f64>, AppError> {
    if entries.len() != RESULTS_PER_GAME {
        return Err(AppError::validation(format!(
            "Expected exactly {RESULTS_PER_GAME} results, got {}",
            entries.len()
        )));
    }

    let ranks: Vec<i64> = entries.iter().map(|(rank, _)| *rank).collect();
    ensure_rank_permutation(&ranks)?;

    let uma = rule.uma_table();
    let points = entries
        .iter()
        .map(|&(rank, raw_score)| {
            let normalized =
                (raw_score - rule.baseline_chip_count) as f64 / rule.points_per_unit;
            normalized + uma[(rank - 1) as usize] as f64
        })
        .collect();

    Ok(points)
}

/// The four ranks of a game must be a permutation of 1..=4.
pub fn ensure_rank_permutation(ranks: &[i64]) -> Result<(), AppError> {
    if ranks.len() != RESULTS_PER_GAME {
        return Err(AppError::validation(format!(
            "Expected exactly {RESULTS_PER_GAME} ranks, got {}",
            ranks.len()
        )));
    }

    let mut seen = [false; RESULTS_PER_GAME];
    for &rank in ranks {
        if !(1..=4).contains(&rank) {
            return Err(AppError::validation(format!(
                "Rank must be between 1 and 4, got {rank}"
            )));
        }
        let idx = (rank - 1) as usize;
        if seen[idx] {
            return Err(AppError::validation(format!("Duplicate rank {rank}")));
        }
        seen[idx] = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_rule() -> ScoringRule {
        ScoringRule::new(25_000, 25_000, [20, 10, -10], 1000.0)
    }

    #[test]
    fn uma_table_sums_to_zero() {
        let rule = standard_rule();
        let uma = rule.uma_table();
        assert_eq!(uma, [20, 10, -10, -20]);
        assert_eq!(uma.iter().sum::<i64>(), 0);

        let skewed = ScoringRule::new(30_000, 30_000, [30, 10, -15], 1000.0);
        assert_eq!(skewed.uma_table().iter().sum::<i64>(), 0);
    }

    #[test]
    fn standard_game_points() {
        let rule = standard_rule();
        let entries = [(1, 35_000), (2, 28_000), (3, 22_000), (4, 15_000)];

        let points = calculate_points(&rule, &entries).unwrap();

        assert_eq!(points, vec![30.0, 13.0, -13.0, -30.0]);
    }

    #[test]
    fn points_sum_to_zero_for_any_uma() {
        let rule = ScoringRule::new(25_000, 30_000, [15, 5, -5], 1000.0);
        let entries = [(3, 21_300), (1, 46_100), (4, 8_900), (2, 23_700)];

        let points = calculate_points(&rule, &entries).unwrap();

        let total: f64 = points.iter().sum();
        assert!(total.abs() < 1e-9, "points summed to {total}");
    }

    #[test]
    fn preserves_input_order() {
        let rule = standard_rule();
        let entries = [(4, 10_000), (1, 40_000), (3, 24_000), (2, 26_000)];

        let points = calculate_points(&rule, &entries).unwrap();

        assert_eq!(points[0], -35.0);
        assert_eq!(points[1], 35.0);
    }

    #[test]
    fn rejects_wrong_result_count() {
        let rule = standard_rule();
        let entries = [(1, 35_000), (2, 28_000), (3, 22_000)];

        assert!(calculate_points(&rule, &entries).is_err());
    }

    #[test]
    fn rejects_duplicate_ranks() {
        let rule = standard_rule();
        let entries = [(1, 35_000), (2, 28_000), (2, 22_000), (4, 15_000)];

        assert!(calculate_points(&rule, &entries).is_err());
    }

    #[test]
    fn rejects_out_of_range_rank() {
        assert!(ensure_rank_permutation(&[0, 1, 2, 3]).is_err());
        assert!(ensure_rank_permutation(&[1, 2, 3, 5]).is_err());
        assert!(ensure_rank_permutation(&[1, 2, 3, 4]).is_ok());
    }
}
