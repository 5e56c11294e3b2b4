//! Integration test: the controller and its timers on a synthetic clock.
//!
//! Time never comes from the system here; every call gets an explicit
//! `Instant`, so deadlines can be asserted exactly.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serpent::core::{GameConfig, GameController, TimerKind};
use serpent::snake::{Direction, InputCommand, Lifecycle, Position, SessionEvent};
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn create_controller(now: Instant) -> GameController<ChaCha8Rng> {
    GameController::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(99), now)
}

/// Advance the clock deadline by deadline until `until`, collecting events.
fn run_until(
    controller: &mut GameController<ChaCha8Rng>,
    until: Instant,
) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Some(deadline) = controller.next_deadline() {
        if deadline > until {
            break;
        }
        events.extend(controller.run_due(deadline));
    }
    events
}

#[test]
fn test_opening_scenario_through_timers() {
    let start = Instant::now();
    let mut controller = create_controller(start);
    controller.handle_input(InputCommand::Steer(Direction::Right), start);

    // Five moves at 200ms each
    run_until(&mut controller, start + ms(1000));
    assert_eq!(controller.session().head(), Position::new(15, 10));

    controller.handle_input(InputCommand::Steer(Direction::Down), start + ms(1050));
    let events = run_until(&mut controller, start + ms(2000));
    assert_eq!(controller.session().head(), Position::new(15, 15));
    assert_eq!(controller.session().score, 10);
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::FoodEaten { .. })));
    assert_eq!(controller.session().elapsed_secs, 2);
}

#[test]
fn test_combo_speed_shortens_tick_interval() {
    let start = Instant::now();
    let mut controller = create_controller(start);
    controller.handle_input(InputCommand::Steer(Direction::Right), start);

    controller.session_mut().food = Position::new(11, 10);
    controller.run_due(start + ms(200));
    controller.session_mut().food = Position::new(12, 10);
    let events = controller.run_due(start + ms(400));
    assert!(events.contains(&SessionEvent::SpeedChanged { from: 5, to: 8 }));

    // Speed 8 moves every 125ms, counted from the speed change
    assert_eq!(controller.next_deadline(), Some(start + ms(525)));
    controller.run_due(start + ms(525));
    assert_eq!(controller.session().head(), Position::new(13, 10));
}

#[test]
fn test_combo_expiry_restores_tick_interval() {
    let start = Instant::now();
    let mut controller = create_controller(start);
    controller.handle_input(InputCommand::Steer(Direction::Up), start);

    // Two quick pickups straight ahead
    controller.session_mut().food = Position::new(10, 9);
    controller.run_due(start + ms(200));
    controller.session_mut().food = Position::new(10, 8);
    controller.run_due(start + ms(400));
    assert_eq!(controller.session().combo.multiplier, 2);

    // Park the food far away so nothing else is eaten
    controller.session_mut().food = Position::new(0, 15);
    let events = run_until(&mut controller, start + ms(6000));
    assert!(events.contains(&SessionEvent::ComboExpired));
    assert!(events.contains(&SessionEvent::SpeedChanged { from: 8, to: 5 }));
    assert_eq!(controller.session().speed.game_speed, 5);
    assert_eq!(controller.session().tick_interval_ms(), 200);
}

#[test]
fn test_game_over_stops_every_timer() {
    let start = Instant::now();
    let mut controller = create_controller(start);
    controller.handle_input(InputCommand::ToggleAutoplay, start);
    controller.handle_input(InputCommand::ToggleAutoplay, start);
    controller.handle_input(InputCommand::Steer(Direction::Right), start);

    controller.session_mut().snake = [(10, 10), (10, 11), (11, 11), (11, 10)]
        .iter()
        .map(|&c| Position::from(c))
        .collect();

    let events = run_until(&mut controller, start + ms(1000));
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::GameOver { .. })));
    assert_eq!(controller.session().lifecycle, Lifecycle::Over);
    for kind in TimerKind::ALL {
        assert!(!controller.is_timer_active(kind));
    }
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn test_input_after_game_over_is_ignored() {
    let start = Instant::now();
    let mut controller = create_controller(start);
    controller.handle_input(InputCommand::Steer(Direction::Right), start);
    controller.session_mut().snake = [(10, 10), (10, 11), (11, 11), (11, 10)]
        .iter()
        .map(|&c| Position::from(c))
        .collect();
    controller.run_due(start + ms(200));
    assert!(controller.session().is_over());

    let later = start + ms(300);
    assert!(controller
        .handle_input(InputCommand::Steer(Direction::Up), later)
        .is_empty());
    assert!(controller
        .handle_input(InputCommand::ToggleAutoplay, later)
        .is_empty());
    assert_eq!(controller.next_deadline(), None);

    // Restart is always honoured
    let events = controller.handle_input(InputCommand::Restart, later);
    assert_eq!(events, vec![SessionEvent::Restarted]);
    assert_eq!(controller.session().lifecycle, Lifecycle::NotStarted);
    assert_eq!(controller.session().len(), 1);
}

#[test]
fn test_restart_mid_game_discards_pending_timers() {
    let start = Instant::now();
    let mut controller = create_controller(start);
    controller.handle_input(InputCommand::ToggleAutoplay, start);
    run_until(&mut controller, start + ms(700));
    assert!(controller.session().tick_count > 0);

    controller.handle_input(InputCommand::Restart, start + ms(750));
    assert_eq!(controller.next_deadline(), None);
    assert!(!controller.session().autoplay);
    assert_eq!(controller.session().tick_count, 0);
    assert_eq!(controller.session().elapsed_secs, 0);
    assert!(controller.run_due(start + ms(5000)).is_empty());
}

#[test]
fn test_log_records_notable_events() {
    let start = Instant::now();
    let mut controller = create_controller(start);
    controller.handle_input(InputCommand::Steer(Direction::Right), start);
    controller.session_mut().food = Position::new(11, 10);
    controller.run_due(start + ms(200));

    let messages: Vec<&str> = controller
        .log()
        .entries()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages, vec!["Game started", "+10"]);
}
