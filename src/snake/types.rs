//! Snake session data structures.
//!
//! A [`GameSession`] holds everything one game mutates: the body, the pending
//! direction changes, food, score, combo and speed. It is owned by the
//! controller and handed by reference to the simulation, autoplay and
//! rendering code.

use super::combo::{ComboState, SpeedState};
use super::grid::{Direction, Grid, Position};
use crate::core::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Waiting for the first valid direction or autoplay activation.
    NotStarted,
    Running,
    /// Terminal: the snake ran into itself.
    Over,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub grid: Grid,
    pub lifecycle: Lifecycle,

    // Snake state
    /// Snake body segments. Head is at the front (index 0).
    pub snake: VecDeque<Position>,
    /// Committed movement direction. `None` while standing still.
    pub direction: Option<Direction>,
    /// Pending direction changes, oldest first. One is consumed per tick.
    pub direction_queue: VecDeque<Direction>,

    // Food
    pub food: Position,

    // Scoring
    pub score: u64,
    pub combo: ComboState,
    pub speed: SpeedState,

    // Timing
    /// Whole seconds since the first move.
    pub elapsed_secs: u64,
    /// Total movement ticks processed.
    pub tick_count: u64,

    // Autoplay
    pub autoplay: bool,
    /// BFS pathfinding with safety fallback; only ever true while autoplay is on.
    pub collision_avoidance: bool,
    /// Next cell the autoplay is steering toward, for display.
    pub autoplay_target: Option<Position>,
}

impl GameSession {
    /// Create a fresh session: one-segment snake on the start cell, food on
    /// the configured start food cell, standing still.
    pub fn new(config: GameConfig) -> Self {
        let config = config.validated();
        let grid = Grid::new(config.tile_count);
        let mut snake = VecDeque::new();
        snake.push_back(grid.wrap_position(config.start_cell.into()));
        let food = grid.wrap_position(config.start_food.into());
        let speed = SpeedState::new(&config);

        Self {
            config,
            grid,
            lifecycle: Lifecycle::NotStarted,
            snake,
            direction: None,
            direction_queue: VecDeque::new(),
            food,
            score: 0,
            combo: ComboState::default(),
            speed,
            elapsed_secs: 0,
            tick_count: 0,
            autoplay: false,
            collision_avoidance: false,
            autoplay_target: None,
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    pub fn is_over(&self) -> bool {
        self.lifecycle == Lifecycle::Over
    }

    /// Movement tick interval in milliseconds at the current speed.
    pub fn tick_interval_ms(&self) -> u64 {
        self.speed.interval_ms()
    }

    pub fn remaining_combo_secs(&self) -> u64 {
        self.combo
            .remaining_secs(self.elapsed_secs, self.config.combo_time_window_secs)
    }

    /// The direction the next queued change is compared against: the last
    /// queued change if any, else the committed direction.
    pub fn latest_intended_direction(&self) -> Option<Direction> {
        self.direction_queue.back().copied().or(self.direction)
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            tile_count: self.grid.tile_count,
            score: self.score,
            combo_multiplier: self.combo.multiplier,
            elapsed_secs: self.elapsed_secs,
            remaining_combo_secs: self.remaining_combo_secs(),
            speed: self.speed.game_speed,
            lifecycle: self.lifecycle,
            autoplay: self.autoplay,
            collision_avoidance: self.collision_avoidance,
            autoplay_target: self.autoplay_target,
        }
    }
}

/// State published to the renderer after each completed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub tile_count: i16,
    pub score: u64,
    pub combo_multiplier: u64,
    pub elapsed_secs: u64,
    pub remaining_combo_secs: u64,
    /// Current speed in cells per second.
    pub speed: u32,
    pub lifecycle: Lifecycle,
    pub autoplay: bool,
    /// Autoplay uses pathfinding rather than the greedy rule.
    pub collision_avoidance: bool,
    pub autoplay_target: Option<Position>,
}

/// Format seconds as `m:ss`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
