// Library interface for stat-guess
// This allows integration tests to access internal modules

pub mod cli;
pub mod comparison;
pub mod config;
pub mod csv_parser;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod profile;
pub mod router;
pub mod schema;
pub mod search;
pub mod tui;

// Re-export commonly used items for easier testing
pub use comparison::{ComparisonGame, comparison_loop};
pub use config::GameConfig;
pub use csv_parser::{CsvParser, ParseOptions};
pub use dataset::{load_players, load_players_from_file, load_players_from_str};
pub use feedback::{Feedback, evaluate_guess};
pub use game_state::{GameRules, GameSession, game_loop};
pub use schema::{Record, Schema, Value};
