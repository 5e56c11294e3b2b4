//! Bounded in-game event log shown in the info panel.

use super::constants::EVENT_LOG_CAPACITY;
use crate::snake::{format_elapsed, Placement, SessionEvent};
use std::collections::VecDeque;

/// Visual weight of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    /// Combo chains and speed-ups.
    Highlight,
    /// Game over and degraded food placement.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_log_entry(&mut self, message: String, level: LogLevel) {
        // Keep only the newest entries
        if self.entries.len() >= EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry { message, level });
    }

    /// Append the entry for `event`, if it is worth showing.
    pub fn record(&mut self, event: &SessionEvent) {
        if let Some((message, level)) = describe(event) {
            self.add_log_entry(message, level);
        }
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Human-readable text for an event. Direction commits are too chatty to log.
pub fn describe(event: &SessionEvent) -> Option<(String, LogLevel)> {
    let line = match event {
        SessionEvent::Started => ("Game started".to_string(), LogLevel::Info),
        SessionEvent::DirectionCommitted { .. } => return None,
        SessionEvent::DirectionDropped { direction } => (
            format!("Ignored reverse turn {}", direction.name()),
            LogLevel::Info,
        ),
        SessionEvent::FoodEaten {
            points,
            combo,
            chained,
            ..
        } => {
            if *chained {
                (format!("+{} combo x{}!", points, combo), LogLevel::Highlight)
            } else {
                (format!("+{}", points), LogLevel::Info)
            }
        }
        SessionEvent::ComboExpired => ("Combo ended".to_string(), LogLevel::Info),
        SessionEvent::SpeedChanged { from, to } => {
            let level = if to > from {
                LogLevel::Highlight
            } else {
                LogLevel::Info
            };
            (format!("Speed {} -> {}", from, to), level)
        }
        SessionEvent::FoodPlacementDegraded { placement } => {
            let text = match placement {
                Placement::Sampled | Placement::Scanned => return None,
                Placement::Unsafe => "Food placed in a tight spot",
                Placement::BoardFull => "No free cell left for food",
            };
            (text.to_string(), LogLevel::Warning)
        }
        SessionEvent::AutoplayToggled { active } => {
            let text = if *active { "Autoplay on" } else { "Autoplay off" };
            (text.to_string(), LogLevel::Info)
        }
        SessionEvent::GameOver { record } => (
            format!(
                "Game over: {} points in {}",
                record.score,
                format_elapsed(record.elapsed_seconds)
            ),
            LogLevel::Warning,
        ),
        SessionEvent::Restarted => ("New game".to_string(), LogLevel::Info),
    };
    Some(line)
}
