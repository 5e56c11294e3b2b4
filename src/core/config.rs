//! Game configuration.
//!
//! Every tuning knob lives here with its default taken from
//! [`crate::core::constants`]. The struct is loaded from `config.json` in the
//! data directory; missing fields fall back to their defaults.

use super::constants::*;
use crate::utils::persistence::{data_path, load_json_or_default};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Tuning values for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square toroidal board.
    pub tile_count: i16,

    /// Starting head cell.
    pub start_cell: (i16, i16),

    /// Food cell at the start of every session.
    pub start_food: (i16, i16),

    /// Speed (cells per second) of a fresh session.
    pub initial_speed: u32,

    /// Speed added for every power-of-ten score step.
    pub speed_increment: u32,

    /// Score base for the logarithmic speed steps.
    pub speed_score_interval: u64,

    /// Hard ceiling on speed, combo boost included.
    pub max_speed: u32,

    /// Extra speed while a combo is running.
    pub combo_speed_boost: u32,

    /// Seconds allowed between two pickups to keep the combo alive.
    pub combo_time_window_secs: u64,

    /// Factor applied to the combo multiplier on each chained pickup.
    pub combo_score_multiplier: u64,

    /// Random samples tried before the exhaustive food scan.
    pub food_placement_attempts: u32,

    /// Autoplay decision interval in milliseconds.
    pub autoplay_interval_ms: u64,

    /// When false, autoplay uses the plain greedy rule instead of BFS.
    pub autoplay_collision_avoidance: bool,

    /// Fixed RNG seed for reproducible food placement (None = entropy).
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: TILE_COUNT,
            start_cell: START_CELL,
            start_food: START_FOOD,
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_score_interval: SPEED_SCORE_INTERVAL,
            max_speed: MAX_SPEED,
            combo_speed_boost: COMBO_SPEED_BOOST,
            combo_time_window_secs: COMBO_TIME_WINDOW_SECS,
            combo_score_multiplier: COMBO_SCORE_MULTIPLIER,
            food_placement_attempts: FOOD_PLACEMENT_ATTEMPTS,
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            autoplay_collision_avoidance: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Clamp values that would break the simulation (zero speed, tiny board,
    /// start cells off the board).
    pub fn validated(mut self) -> Self {
        self.tile_count = self.tile_count.max(4);
        self.initial_speed = self.initial_speed.max(1);
        self.max_speed = self.max_speed.max(self.initial_speed);
        self.speed_score_interval = self.speed_score_interval.max(1);
        self.combo_score_multiplier = self.combo_score_multiplier.max(1);
        self.autoplay_interval_ms = self.autoplay_interval_ms.max(1);

        let wrap = |v: i16| v.rem_euclid(self.tile_count);
        self.start_cell = (wrap(self.start_cell.0), wrap(self.start_cell.1));
        self.start_food = (wrap(self.start_food.0), wrap(self.start_food.1));
        if self.start_food == self.start_cell {
            self.start_food = (wrap(self.start_cell.0 + self.tile_count / 2), self.start_cell.1);
        }
        self
    }
}

pub fn config_path() -> io::Result<PathBuf> {
    data_path(CONFIG_FILE)
}

/// Read a config file; a missing or unreadable file gives the defaults.
pub fn load_config_from(path: &Path) -> GameConfig {
    load_json_or_default::<GameConfig>(path).validated()
}

/// Load `config.json` from the data directory.
pub fn load_config() -> GameConfig {
    match config_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => GameConfig::default(),
    }
}
