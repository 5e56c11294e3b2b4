//! Game controller: owns one session and the timers that drive it.
//!
//! Input and due timers are turned into simulation calls here. Each batch of
//! [`SessionEvent`]s is written to the event log and then used to bring the
//! timers back in line with the session (movement interval after speed
//! changes, autoplay timer on toggle, everything stopped on game over).

use super::config::GameConfig;
use super::event_log::EventLog;
use super::scheduler::{Scheduler, TimerKind};
use crate::core::constants::WALL_CLOCK_INTERVAL_MS;
use crate::snake::{
    autoplay_step, steer, tick, toggle_autoplay, wall_clock_second, GameSession, InputCommand,
    Lifecycle, SessionEvent, Snapshot,
};
use rand::Rng;
use std::time::{Duration, Instant};

pub struct GameController<R: Rng> {
    config: GameConfig,
    session: GameSession,
    scheduler: Scheduler,
    log: EventLog,
    rng: R,
}

impl<R: Rng> GameController<R> {
    /// Start a fresh session. Timers begin once the game does.
    pub fn new(config: GameConfig, rng: R, now: Instant) -> Self {
        let config = config.validated();
        let mut controller = Self {
            session: GameSession::new(config.clone()),
            config,
            scheduler: Scheduler::new(),
            log: EventLog::new(),
            rng,
        };
        controller.sync_timers(&[], now);
        controller
    }

    pub fn handle_input(&mut self, command: InputCommand, now: Instant) -> Vec<SessionEvent> {
        match command {
            InputCommand::Steer(direction) => {
                let events = steer(&mut self.session, direction);
                self.apply(events, now)
            }
            InputCommand::ToggleAutoplay => {
                let events = toggle_autoplay(&mut self.session);
                self.apply(events, now)
            }
            InputCommand::Restart => self.restart(now),
        }
    }

    /// Fire every timer that is due at `now`, earliest first.
    pub fn run_due(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut all = Vec::new();
        while let Some(kind) = self.scheduler.pop_due(now) {
            let events = match kind {
                TimerKind::Movement => tick(&mut self.session, &mut self.rng),
                TimerKind::WallClock => wall_clock_second(&mut self.session),
                TimerKind::Autoplay => {
                    autoplay_step(&mut self.session);
                    Vec::new()
                }
            };
            all.extend(self.apply(events, now));
        }
        all
    }

    /// Throw the current session away and start over with the same config.
    pub fn restart(&mut self, now: Instant) -> Vec<SessionEvent> {
        self.scheduler.cancel_all();
        self.session = GameSession::new(self.config.clone());
        self.apply(vec![SessionEvent::Restarted], now)
    }

    fn apply(&mut self, events: Vec<SessionEvent>, now: Instant) -> Vec<SessionEvent> {
        for event in &events {
            self.log.record(event);
        }
        self.sync_timers(&events, now);
        events
    }

    fn sync_timers(&mut self, events: &[SessionEvent], now: Instant) {
        match self.session.lifecycle {
            Lifecycle::Over => {
                self.scheduler.cancel_all();
                return;
            }
            Lifecycle::NotStarted => return,
            Lifecycle::Running => {}
        }

        let interval = Duration::from_millis(self.session.tick_interval_ms());
        let speed_event = events.iter().any(|e| {
            matches!(
                e,
                SessionEvent::FoodEaten { .. }
                    | SessionEvent::ComboExpired
                    | SessionEvent::SpeedChanged { .. }
            )
        });
        if speed_event || self.scheduler.interval(TimerKind::Movement) != Some(interval) {
            self.scheduler.schedule(TimerKind::Movement, interval, now);
        }

        if !self.scheduler.is_active(TimerKind::WallClock) {
            self.scheduler.schedule(
                TimerKind::WallClock,
                Duration::from_millis(WALL_CLOCK_INTERVAL_MS),
                now,
            );
        }

        if self.session.autoplay {
            if !self.scheduler.is_active(TimerKind::Autoplay) {
                self.scheduler.schedule(
                    TimerKind::Autoplay,
                    Duration::from_millis(self.config.autoplay_interval_ms),
                    now,
                );
            }
        } else {
            self.scheduler.cancel(TimerKind::Autoplay);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct access for scripted scenarios and the simulator.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn is_timer_active(&self, kind: TimerKind) -> bool {
        self.scheduler.is_active(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn create_controller(now: Instant) -> GameController<ChaCha8Rng> {
        GameController::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(7), now)
    }

    #[test]
    fn test_no_timers_before_start() {
        let start = Instant::now();
        let controller = create_controller(start);
        assert_eq!(controller.next_deadline(), None);
        assert_eq!(controller.session().lifecycle, Lifecycle::NotStarted);
    }

    #[test]
    fn test_first_direction_starts_timers() {
        let start = Instant::now();
        let mut controller = create_controller(start);
        let events = controller.handle_input(InputCommand::Steer(Direction::Right), start);
        assert_eq!(events, vec![SessionEvent::Started]);
        assert!(controller.is_timer_active(TimerKind::Movement));
        assert!(controller.is_timer_active(TimerKind::WallClock));
        assert!(!controller.is_timer_active(TimerKind::Autoplay));
        // Speed 5 moves every 200ms
        assert_eq!(controller.next_deadline(), Some(start + ms(200)));
    }

    #[test]
    fn test_movement_follows_tick_interval() {
        let start = Instant::now();
        let mut controller = create_controller(start);
        controller.handle_input(InputCommand::Steer(Direction::Right), start);

        controller.run_due(start + ms(199));
        assert_eq!(controller.session().head(), Position::new(10, 10));
        controller.run_due(start + ms(200));
        assert_eq!(controller.session().head(), Position::new(11, 10));
        controller.run_due(start + ms(400));
        assert_eq!(controller.session().head(), Position::new(12, 10));
    }

    #[test]
    fn test_wall_clock_advances_elapsed() {
        let start = Instant::now();
        let mut controller = create_controller(start);
        controller.handle_input(InputCommand::Steer(Direction::Up), start);
        let mut now = start;
        for _ in 0..3 {
            now += ms(1000);
            controller.run_due(now);
        }
        assert_eq!(controller.session().elapsed_secs, 3);
    }

    #[test]
    fn test_autoplay_timer_follows_toggle() {
        let start = Instant::now();
        let mut controller = create_controller(start);
        controller.handle_input(InputCommand::ToggleAutoplay, start);
        assert_eq!(controller.session().lifecycle, Lifecycle::Running);
        assert!(controller.is_timer_active(TimerKind::Autoplay));
        assert_eq!(controller.next_deadline(), Some(start + ms(10)));

        controller.handle_input(InputCommand::ToggleAutoplay, start + ms(5));
        assert!(!controller.is_timer_active(TimerKind::Autoplay));
        assert!(controller.is_timer_active(TimerKind::Movement));
    }

    #[test]
    fn test_game_over_cancels_all_timers() {
        let start = Instant::now();
        let mut controller = create_controller(start);
        controller.handle_input(InputCommand::Steer(Direction::Right), start);
        // Box the head in with its own body
        controller.session.snake = [(10, 10), (11, 10), (11, 11), (10, 11), (9, 11)]
            .iter()
            .map(|&c| Position::from(c))
            .collect();

        let events = controller.run_due(start + ms(200));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::GameOver { .. })));
        assert!(controller.session().is_over());
        assert_eq!(controller.next_deadline(), None);
        assert!(controller
            .log()
            .entries()
            .any(|e| e.message.starts_with("Game over")));
    }

    #[test]
    fn test_restart_resets_session() {
        let start = Instant::now();
        let mut controller = create_controller(start);
        controller.handle_input(InputCommand::Steer(Direction::Down), start);
        controller.run_due(start + ms(600));
        let events = controller.handle_input(InputCommand::Restart, start + ms(700));
        assert_eq!(events, vec![SessionEvent::Restarted]);
        assert_eq!(controller.session().lifecycle, Lifecycle::NotStarted);
        assert_eq!(controller.session().head(), Position::new(10, 10));
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn test_food_reschedules_movement() {
        let start = Instant::now();
        let mut controller = create_controller(start);
        controller.session.food = Position::new(11, 10);
        controller.handle_input(InputCommand::Steer(Direction::Right), start);

        let events = controller.run_due(start + ms(200));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::FoodEaten { .. })));
        // Base speed stays 5 on the first pickup, timer restarted from now
        assert_eq!(controller.next_deadline(), Some(start + ms(400)));
        assert_eq!(controller.session().score, 10);
    }
}
