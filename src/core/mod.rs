//! Core plumbing: constants, configuration, timers, event log and the
//! controller that drives a game session.

pub mod config;
pub mod constants;
pub mod controller;
pub mod event_log;
pub mod scheduler;

pub use config::{load_config, GameConfig};
pub use controller::GameController;
pub use event_log::{EventLog, LogEntry, LogLevel};
pub use scheduler::{Scheduler, TimerKind};
