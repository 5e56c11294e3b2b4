//! Utility modules: JSON persistence.

pub mod persistence;

pub use persistence::*;
