//! Game history: the top-10 leaderboard and its JSON file.

pub mod persistence;
pub mod types;

pub use persistence::{history_path, load_history, record_game_at, save_history};
pub use types::{HistoryRecord, Leaderboard, TIMESTAMP_FORMAT};
