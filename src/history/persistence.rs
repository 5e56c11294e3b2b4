//! Leaderboard persistence (load/save to disk).

use super::types::{HistoryRecord, Leaderboard};
use crate::core::constants::HISTORY_FILE;
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use std::io;
use std::path::{Path, PathBuf};

/// Get the history file path in the data directory.
pub fn history_path() -> io::Result<PathBuf> {
    data_path(HISTORY_FILE)
}

/// Load the leaderboard from `path`, or an empty one if missing or invalid.
pub fn load_history_from(path: &Path) -> Leaderboard {
    let records: Vec<HistoryRecord> = load_json_or_default(path);
    Leaderboard::from_records(records)
}

pub fn save_history_to(path: &Path, board: &Leaderboard) -> io::Result<()> {
    save_json(path, board)
}

/// Load the leaderboard from the data directory.
pub fn load_history() -> Leaderboard {
    match history_path() {
        Ok(path) => load_history_from(&path),
        Err(_) => Leaderboard::default(),
    }
}

/// Save the leaderboard to the data directory.
pub fn save_history(board: &Leaderboard) -> io::Result<()> {
    save_history_to(&history_path()?, board)
}

/// Add a record and write the board back to `path` in one go.
/// Returns the record's rank if it made the board.
pub fn record_game_at(
    path: &Path,
    board: &mut Leaderboard,
    record: HistoryRecord,
) -> io::Result<Option<usize>> {
    let rank = board.insert(record);
    save_history_to(path, board)?;
    Ok(rank)
}
