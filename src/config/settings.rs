/// Defaults applied when a season is created and when league settings
/// are updated with fields omitted. Chip counts and uma follow the
/// standard 25000-start hanchan convention.
#[derive(Debug, Clone)]
pub struct ScoringDefaults {
    pub game_start_chip_count: i64,
    pub calculation_base_chip_count: i64,
    pub uma: [i64; 3],
    /// Chips per point unit when normalizing a raw score against the
    /// calculation base. 1000.0 means scores are counted in thousands.
    pub points_per_unit: f64,
}

impl Default for ScoringDefaults {
    fn default() -> Self {
        Self {
            game_start_chip_count: 25_000,
            calculation_base_chip_count: 25_000,
            uma: [20, 10, -10],
            points_per_unit: 1000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "mahjong_league.db".to_string());
        Self { path }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scoring: ScoringDefaults,
    pub database: DatabaseSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scoring: ScoringDefaults::default(),
            database: DatabaseSettings::default(),
        }
    }
}
