//! Combo multiplier and speed progression.
//!
//! Speed is measured in cells per second. The base speed climbs one step each
//! time the score crosses a new power-of-ten multiple of the score interval,
//! and a running combo adds a flat boost on top.

use crate::core::config::GameConfig;
use crate::core::constants::{COMBO_MULTIPLIER_CAP, FOOD_POINTS};
use serde::{Deserialize, Serialize};

/// Speed bonus earned from score alone.
///
/// `floor(log10(score / interval)) * increment`, or 0 below the first
/// interval. Computed on integers so exact powers of ten land on their step.
pub fn speed_step(score: u64, score_interval: u64, increment: u32) -> u32 {
    let interval = score_interval.max(1);
    if score < interval {
        return 0;
    }
    let mut power = 0u32;
    let mut threshold = interval;
    while let Some(next) = threshold.checked_mul(10) {
        if next > score {
            break;
        }
        threshold = next;
        power += 1;
    }
    power.saturating_mul(increment)
}

/// Milliseconds between movement ticks at `speed` cells per second.
pub fn speed_to_interval_ms(speed: u32) -> u64 {
    1000 / u64::from(speed.max(1))
}

/// Combo multiplier and the time of the last pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboState {
    pub multiplier: u64,
    /// Elapsed game second of the most recent pickup. `None` until the first
    /// food of the session, so an opening pickup never counts as a chain.
    pub last_food_time: Option<u64>,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            multiplier: 1,
            last_food_time: None,
        }
    }
}

impl ComboState {
    pub fn is_active(&self) -> bool {
        self.multiplier > 1
    }

    /// True when `now` is still within the window after the last pickup.
    pub fn within_window(&self, now: u64, window: u64) -> bool {
        match self.last_food_time {
            Some(last) => now.saturating_sub(last) <= window,
            None => false,
        }
    }

    /// True when a running combo should be dropped at `now`.
    pub fn is_expired(&self, now: u64, window: u64) -> bool {
        self.is_active() && !self.within_window(now, window)
    }

    /// Whole seconds left before the combo expires; 0 when no combo runs.
    pub fn remaining_secs(&self, now: u64, window: u64) -> u64 {
        match self.last_food_time {
            Some(last) if self.is_active() => window.saturating_sub(now.saturating_sub(last)),
            _ => 0,
        }
    }

    /// Register a pickup at `now`. Returns true if it chained onto a combo.
    pub fn register_food(&mut self, now: u64, window: u64, factor: u64) -> bool {
        let chained = self.within_window(now, window);
        if chained {
            self.multiplier = self
                .multiplier
                .saturating_mul(factor)
                .min(COMBO_MULTIPLIER_CAP);
        } else {
            self.multiplier = 1;
        }
        self.last_food_time = Some(now);
        chained
    }

    pub fn reset(&mut self) {
        self.multiplier = 1;
    }

    /// Points for one pickup at the current multiplier.
    pub fn points(&self) -> u64 {
        FOOD_POINTS.saturating_mul(self.multiplier)
    }
}

/// Base and effective speed, in cells per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedState {
    pub base_speed: u32,
    pub game_speed: u32,
}

impl SpeedState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            base_speed: config.initial_speed,
            game_speed: config.initial_speed,
        }
    }

    /// Recompute the base speed from `score`.
    pub fn recompute_base(&mut self, score: u64, config: &GameConfig) {
        let step = speed_step(score, config.speed_score_interval, config.speed_increment);
        self.base_speed = config
            .initial_speed
            .saturating_add(step)
            .min(config.max_speed);
    }

    /// Effective speed with or without the combo boost.
    pub fn apply_combo(&mut self, combo_active: bool, config: &GameConfig) {
        self.game_speed = if combo_active {
            self.base_speed
                .saturating_add(config.combo_speed_boost)
                .min(config.max_speed)
        } else {
            self.base_speed
        };
    }

    pub fn interval_ms(&self) -> u64 {
        speed_to_interval_ms(self.game_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_step_examples() {
        assert_eq!(speed_step(0, 100, 2), 0);
        assert_eq!(speed_step(50, 100, 2), 0);
        assert_eq!(speed_step(100, 100, 2), 0);
        assert_eq!(speed_step(150, 100, 2), 0);
        assert_eq!(speed_step(999, 100, 2), 0);
        assert_eq!(speed_step(1000, 100, 2), 2);
        assert_eq!(speed_step(1500, 100, 2), 2);
        assert_eq!(speed_step(10_000, 100, 2), 4);
        assert_eq!(speed_step(123_456, 100, 2), 6);
    }

    #[test]
    fn test_speed_step_monotonic() {
        let mut prev = 0;
        for score in (0..200_000).step_by(37) {
            let step = speed_step(score, 100, 2);
            assert!(step >= prev, "speed_step decreased at score {}", score);
            prev = step;
        }
    }

    #[test]
    fn test_speed_step_huge_score_does_not_overflow() {
        assert_eq!(speed_step(u64::MAX, 100, 2), 34);
    }

    #[test]
    fn test_interval_from_speed() {
        assert_eq!(speed_to_interval_ms(5), 200);
        assert_eq!(speed_to_interval_ms(20), 50);
        assert_eq!(speed_to_interval_ms(0), 1000);
    }

    #[test]
    fn test_first_pickup_is_not_a_chain() {
        let mut combo = ComboState::default();
        assert!(!combo.register_food(2, 5, 2));
        assert_eq!(combo.multiplier, 1);
        assert_eq!(combo.last_food_time, Some(2));
    }

    #[test]
    fn test_chained_pickups_multiply() {
        let mut combo = ComboState::default();
        combo.register_food(1, 5, 2);
        assert!(combo.register_food(4, 5, 2));
        assert_eq!(combo.multiplier, 2);
        assert!(combo.register_food(9, 5, 2)); // exactly at the window edge
        assert_eq!(combo.multiplier, 4);
        assert_eq!(combo.points(), 40);
    }

    #[test]
    fn test_late_pickup_resets() {
        let mut combo = ComboState::default();
        combo.register_food(1, 5, 2);
        combo.register_food(2, 5, 2);
        assert_eq!(combo.multiplier, 2);
        assert!(!combo.register_food(8, 5, 2));
        assert_eq!(combo.multiplier, 1);
    }

    #[test]
    fn test_multiplier_capped() {
        let mut combo = ComboState {
            multiplier: 800_000,
            last_food_time: Some(0),
        };
        combo.register_food(1, 5, 2);
        assert_eq!(combo.multiplier, COMBO_MULTIPLIER_CAP);
    }

    #[test]
    fn test_expiry_and_remaining() {
        let combo = ComboState {
            multiplier: 2,
            last_food_time: Some(10),
        };
        assert_eq!(combo.remaining_secs(12, 5), 3);
        assert!(!combo.is_expired(15, 5));
        assert!(combo.is_expired(16, 5));
        assert_eq!(ComboState::default().remaining_secs(3, 5), 0);
    }

    #[test]
    fn test_speed_state_combo_boost_capped() {
        let config = GameConfig::default();
        let mut speed = SpeedState::new(&config);
        speed.recompute_base(1500, &config);
        assert_eq!(speed.base_speed, 7);
        speed.apply_combo(true, &config);
        assert_eq!(speed.game_speed, 10);

        speed.base_speed = 19;
        speed.apply_combo(true, &config);
        assert_eq!(speed.game_speed, 20);
        speed.apply_combo(false, &config);
        assert_eq!(speed.game_speed, 19);
    }

    #[test]
    fn test_base_speed_capped() {
        let config = GameConfig::default();
        let mut speed = SpeedState::new(&config);
        speed.recompute_base(u64::MAX, &config);
        assert_eq!(speed.base_speed, config.max_speed);
    }
}
