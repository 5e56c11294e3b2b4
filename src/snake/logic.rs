//! Snake game logic: movement, input processing, collision, combo expiry.
//!
//! Every function here mutates a [`GameSession`] and reports what happened as
//! [`SessionEvent`]s. Nothing in this module knows about timers or the
//! terminal; the controller decides when each function runs.

use super::food::{place_food, Placement};
use super::grid::{Direction, Position};
use super::types::{GameSession, Lifecycle};
use crate::core::constants::DIRECTION_QUEUE_CAPACITY;
use crate::history::HistoryRecord;
use rand::Rng;

/// UI-agnostic input commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Steer(Direction),
    ToggleAutoplay,
    Restart,
}

/// A single event produced by the simulation.
///
/// The controller maps these to log entries and timer changes; the
/// simulation never touches either directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// First valid direction (or autoplay) got the snake moving.
    Started,
    /// A queued direction became the movement direction.
    DirectionCommitted { direction: Direction },
    /// A queued direction reversed the movement direction and was discarded.
    DirectionDropped { direction: Direction },
    /// Food was eaten. `points` already includes the combo multiplier.
    FoodEaten {
        at: Position,
        points: u64,
        combo: u64,
        chained: bool,
        score: u64,
    },
    /// A running combo timed out and the multiplier went back to 1.
    ComboExpired,
    /// Effective speed changed (cells per second).
    SpeedChanged { from: u32, to: u32 },
    /// Random sampling could not place food and a fallback was used.
    FoodPlacementDegraded { placement: Placement },
    AutoplayToggled { active: bool },
    /// The snake ran into itself.
    GameOver { record: HistoryRecord },
    Restarted,
}

/// Queue a player direction change.
///
/// Rejected while autoplay drives the snake, after game over, and when it is
/// the exact reverse of the committed direction. Returns the events produced
/// (a `Started` when this input begins the game).
pub fn steer(session: &mut GameSession, direction: Direction) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    if session.is_over() || session.autoplay {
        return events;
    }
    if session
        .direction
        .is_some_and(|current| direction == current.opposite())
    {
        return events;
    }

    if session.lifecycle == Lifecycle::NotStarted {
        session.lifecycle = Lifecycle::Running;
        events.push(SessionEvent::Started);
    }

    if session.latest_intended_direction() != Some(direction)
        && session.direction_queue.len() < DIRECTION_QUEUE_CAPACITY
    {
        session.direction_queue.push_back(direction);
    }
    events
}

/// Flip autoplay on or off. Turning it on discards queued player input and
/// starts a waiting game.
pub fn toggle_autoplay(session: &mut GameSession) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    if session.is_over() {
        return events;
    }

    session.autoplay = !session.autoplay;
    session.collision_avoidance = session.autoplay && session.config.autoplay_collision_avoidance;
    session.autoplay_target = None;
    events.push(SessionEvent::AutoplayToggled {
        active: session.autoplay,
    });

    if session.autoplay {
        session.direction_queue.clear();
        if session.lifecycle == Lifecycle::NotStarted {
            session.lifecycle = Lifecycle::Running;
            events.push(SessionEvent::Started);
        }
    }
    events
}

/// Single movement step.
pub fn tick<R: Rng>(session: &mut GameSession, rng: &mut R) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    if session.is_over() {
        return events;
    }
    session.tick_count += 1;

    // Apply the oldest queued direction unless it reverses the current one
    if let Some(next) = session.direction_queue.pop_front() {
        match session.direction {
            Some(current) if next == current.opposite() => {
                events.push(SessionEvent::DirectionDropped { direction: next });
            }
            Some(current) if next == current => {}
            _ => {
                session.direction = Some(next);
                events.push(SessionEvent::DirectionCommitted { direction: next });
            }
        }
    }

    // Standing still: nothing moves until a direction is committed
    let Some(direction) = session.direction else {
        return events;
    };

    let new_head = session.grid.step(session.head(), direction);

    if session.occupies(new_head) {
        session.lifecycle = Lifecycle::Over;
        session.autoplay = false;
        session.collision_avoidance = false;
        session.direction_queue.clear();
        events.push(SessionEvent::GameOver {
            record: HistoryRecord::now(session.score, session.elapsed_secs),
        });
        return events;
    }

    session.snake.push_front(new_head);
    if new_head == session.food {
        consume_food(session, rng, &mut events);
    } else {
        session.snake.pop_back();
    }
    events
}

/// Eat the food under the head: update speed and combo, score, place new food.
///
/// Base speed is recomputed from the score before this pickup's points are
/// added.
fn consume_food<R: Rng>(session: &mut GameSession, rng: &mut R, events: &mut Vec<SessionEvent>) {
    let config = &session.config;
    let speed_before = session.speed.game_speed;

    session.speed.recompute_base(session.score, config);
    let chained = session.combo.register_food(
        session.elapsed_secs,
        config.combo_time_window_secs,
        config.combo_score_multiplier,
    );
    session.speed.apply_combo(chained, config);

    let points = session.combo.points();
    session.score = session.score.saturating_add(points);
    events.push(SessionEvent::FoodEaten {
        at: session.head(),
        points,
        combo: session.combo.multiplier,
        chained,
        score: session.score,
    });

    if session.speed.game_speed != speed_before {
        events.push(SessionEvent::SpeedChanged {
            from: speed_before,
            to: session.speed.game_speed,
        });
    }

    let (food, placement) = place_food(
        &session.grid,
        &session.snake,
        config.food_placement_attempts,
        rng,
    );
    session.food = food;
    if placement != Placement::Sampled {
        events.push(SessionEvent::FoodPlacementDegraded { placement });
    }
}

/// One wall-clock second: advance the game clock and expire a stale combo.
pub fn wall_clock_second(session: &mut GameSession) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    if session.is_over() {
        return events;
    }
    if session.lifecycle == Lifecycle::Running {
        session.elapsed_secs += 1;
    }

    let window = session.config.combo_time_window_secs;
    if session.combo.is_expired(session.elapsed_secs, window) {
        let speed_before = session.speed.game_speed;
        session.combo.reset();
        session.speed.recompute_base(session.score, &session.config);
        session.speed.apply_combo(false, &session.config);
        events.push(SessionEvent::ComboExpired);
        if session.speed.game_speed != speed_before {
            events.push(SessionEvent::SpeedChanged {
                from: speed_before,
                to: session.speed.game_speed,
            });
        }
    }
    events
}
