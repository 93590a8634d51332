use chrono::NaiveDate;

use crate::errors::AppError;

/// Time scope applied to game selection. Both the aggregator and the
/// history view accept a window, and the store-side filter must agree
/// with `contains` on membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    AllTime,
    Season(i64),
    SingleDate(NaiveDate),
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl Window {
    /// Inclusive on both ends; rejects an inverted range.
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::validation(format!(
                "Invalid date range: start {start} is after end {end}"
            )));
        }
        Ok(Window::DateRange { start, end })
    }

    pub fn contains(&self, game_date: NaiveDate, season_id: i64) -> bool {
        match self {
            Window::AllTime => true,
            Window::Season(id) => season_id == *id,
            Window::SingleDate(date) => game_date == *date,
            Window::DateRange { start, end } => *start <= game_date && game_date <= *end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = Window::date_range(date(2025, 6, 2), date(2025, 6, 1));
        assert!(result.is_err());
    }

    #[test]
    fn single_day_range_is_allowed() {
        let window = Window::date_range(date(2025, 6, 1), date(2025, 6, 1)).unwrap();
        assert!(window.contains(date(2025, 6, 1), 7));
        assert!(!window.contains(date(2025, 6, 2), 7));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let window = Window::date_range(date(2025, 6, 1), date(2025, 6, 30)).unwrap();

        assert!(window.contains(date(2025, 6, 1), 1));
        assert!(window.contains(date(2025, 6, 30), 1));
        assert!(!window.contains(date(2025, 5, 31), 1));
        assert!(!window.contains(date(2025, 7, 1), 1));
    }

    #[test]
    fn season_window_ignores_dates() {
        let window = Window::Season(3);

        assert!(window.contains(date(1999, 1, 1), 3));
        assert!(!window.contains(date(2025, 6, 1), 4));
    }

    #[test]
    fn all_time_accepts_everything() {
        assert!(Window::AllTime.contains(date(2025, 1, 1), 42));
    }
}
