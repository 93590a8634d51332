use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Season {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub description: Option<String>,
    pub created_date: Option<NaiveDateTime>,
}

/// Per-season activity counts attached to season listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonSummary {
    pub game_count: i64,
    pub player_count: i64,
}

#[derive(Debug, Clone)]
pub struct LeagueSettingsRow {
    pub season_id: i64,
    pub game_start_chip_count: i64,
    pub calculation_base_chip_count: i64,
    pub uma_1st: i64,
    pub uma_2nd: i64,
    pub uma_3rd: i64,
}

/// Explicit patch structs: updates apply whichever fields are present,
/// field-by-field, each with its own fixed statement.
#[derive(Debug, Clone, Default)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_url.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeasonPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl SeasonPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct LeagueSettingsUpdate {
    pub game_start_chip_count: i64,
    pub calculation_base_chip_count: i64,
    pub uma_1st: i64,
    pub uma_2nd: i64,
    pub uma_3rd: i64,
}
