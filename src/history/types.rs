//! Leaderboard data structures.

use crate::core::constants::HISTORY_CAPACITY;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp layout for history records (24-hour clock).
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub score: u64,
    /// Game clock at game over, in whole seconds.
    #[serde(alias = "time")]
    pub elapsed_seconds: u64,
    pub timestamp: String,
}

impl HistoryRecord {
    pub fn new(score: u64, elapsed_seconds: u64, timestamp: String) -> Self {
        Self {
            score,
            elapsed_seconds,
            timestamp,
        }
    }

    /// A record stamped with the local wall-clock time.
    pub fn now(score: u64, elapsed_seconds: u64) -> Self {
        Self::new(
            score,
            elapsed_seconds,
            Local::now().format(TIMESTAMP_FORMAT).to_string(),
        )
    }
}

/// Best games, highest score first, at most [`HISTORY_CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    records: Vec<HistoryRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary records, restoring order and capacity.
    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        let mut board = Self { records };
        board.normalize();
        board
    }

    /// Add a finished game. Returns its 1-based rank, or `None` if it did not
    /// make the cut. Equal scores keep the older record ahead.
    pub fn insert(&mut self, record: HistoryRecord) -> Option<usize> {
        self.records.push(record);
        let inserted = self.records.len() - 1;

        // Stable sort: the new record lands after existing equal scores
        let mut order: Vec<usize> = (0..self.records.len()).collect();
        order.sort_by(|&a, &b| self.records[b].score.cmp(&self.records[a].score));
        let rank = order.iter().position(|&i| i == inserted);

        self.normalize();
        rank.filter(|&r| r < HISTORY_CAPACITY).map(|r| r + 1)
    }

    fn normalize(&mut self) {
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
        self.records.truncate(HISTORY_CAPACITY);
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn best(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
