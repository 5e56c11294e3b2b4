//! Snake simulation: toroidal grid, session state, combo/speed engine, food
//! placement, movement ticks and autoplay.

pub mod autoplay;
pub mod combo;
pub mod food;
pub mod grid;
pub mod logic;
pub mod types;

pub use autoplay::{autoplay_step, decide, find_safe_path, Decision};
pub use combo::{speed_step, speed_to_interval_ms, ComboState, SpeedState};
pub use food::{is_danger_position, place_food, Placement};
pub use grid::{Direction, Grid, Position};
pub use logic::{steer, tick, toggle_autoplay, wall_clock_second, InputCommand, SessionEvent};
pub use types::{format_elapsed, GameSession, Lifecycle, Snapshot};
