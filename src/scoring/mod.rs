pub mod aggregate;
pub mod history;
pub mod leaderboard;
pub mod points;
pub mod types;
pub mod validate;
pub mod window;

pub use aggregate::aggregate_players;
pub use history::build_history;
pub use leaderboard::build_leaderboard;
pub use points::calculate_points;
pub use types::{GameRecord, GameResultRow, GameRow, PlayerAggregate, ResultRow, ScoringRule};
pub use validate::{validate_submission, GameSubmission, ResultSubmission, ValidGame};
pub use window::Window;
