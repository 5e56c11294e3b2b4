//! Serpent - toroidal combo snake for the terminal.
//!
//! This module exposes the game logic for testing and external use.

pub mod build_info;
pub mod core;
pub mod history;
pub mod snake;
pub mod utils;
