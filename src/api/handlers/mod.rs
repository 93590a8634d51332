use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::settings::{AppConfig, ScoringDefaults};
use crate::database::models::LeagueSettingsRow;
use crate::database::DbPool;
use crate::errors::AppError;
use crate::scoring::{ScoringRule, Window};

pub mod games;
pub mod players;
pub mod seasons;
pub mod settings;
pub mod standings;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct DateParam {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub(crate) fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("Invalid {field} '{value}', expected YYYY-MM-DD"))
    })
}

pub(crate) fn daily_window(params: &DateParam) -> Result<Window, AppError> {
    let raw = params
        .date
        .as_deref()
        .ok_or_else(|| AppError::validation("date query parameter is required"))?;
    Ok(Window::SingleDate(parse_date(raw, "date")?))
}

pub(crate) fn range_window(params: &DateRangeParams) -> Result<Window, AppError> {
    let (Some(start_raw), Some(end_raw)) =
        (params.start_date.as_deref(), params.end_date.as_deref())
    else {
        return Err(AppError::validation(
            "start_date and end_date query parameters are required",
        ));
    };

    let start = parse_date(start_raw, "start_date")?;
    let end = parse_date(end_raw, "end_date")?;
    Window::date_range(start, end)
}

/// The per-season rule: stored settings plus the configured normalization
/// factor.
pub(crate) fn scoring_rule(
    row: &LeagueSettingsRow,
    defaults: &ScoringDefaults,
) -> ScoringRule {
    ScoringRule::new(
        row.game_start_chip_count,
        row.calculation_base_chip_count,
        [row.uma_1st, row.uma_2nd, row.uma_3rd],
        defaults.points_per_unit,
    )
}
