//! Cooperative timer scheduler.
//!
//! The game runs three periodic timers (movement, wall clock, autoplay) that
//! all mutate the same session. The scheduler never runs anything itself: the
//! event loop asks it which timer is due next and fires that one, so two
//! timers can never act at once. Times are passed in as [`Instant`]s, which
//! keeps the scheduler deterministic under test.

use std::time::{Duration, Instant};

/// The periodic tasks of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Snake movement at `1000 / speed` ms.
    Movement,
    /// One-second game clock and combo expiry.
    WallClock,
    /// Autoplay decisions, only while autoplay is on.
    Autoplay,
}

impl TimerKind {
    /// Firing order when several timers share a deadline.
    pub const ALL: [TimerKind; 3] = [TimerKind::Movement, TimerKind::WallClock, TimerKind::Autoplay];

    fn slot(self) -> usize {
        match self {
            TimerKind::Movement => 0,
            TimerKind::WallClock => 1,
            TimerKind::Autoplay => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    interval: Duration,
    next_due: Instant,
}

/// Cancellable, reschedulable periodic timers.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: [Option<Timer>; 3],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `kind` with `interval`, first firing at `now + interval`.
    /// A running timer of the same kind is cancelled and restarted.
    pub fn schedule(&mut self, kind: TimerKind, interval: Duration, now: Instant) {
        let interval = interval.max(Duration::from_millis(1));
        self.timers[kind.slot()] = Some(Timer {
            interval,
            next_due: now + interval,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers[kind.slot()] = None;
    }

    /// Stop every timer in one step.
    pub fn cancel_all(&mut self) {
        self.timers = [None; 3];
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.timers[kind.slot()].is_some()
    }

    pub fn interval(&self, kind: TimerKind) -> Option<Duration> {
        self.timers[kind.slot()].map(|t| t.interval)
    }

    /// Earliest pending deadline, if any timer is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().flatten().map(|t| t.next_due).min()
    }

    /// Take the most overdue timer whose deadline has passed.
    ///
    /// The fired timer's next deadline advances by one interval. A timer that
    /// has fallen more than a whole interval behind is re-anchored to
    /// `now + interval` instead of firing a burst to catch up.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKind> {
        let mut due: Option<(TimerKind, Instant)> = None;
        for kind in TimerKind::ALL {
            if let Some(timer) = self.timers[kind.slot()] {
                if timer.next_due <= now && due.map_or(true, |(_, at)| timer.next_due < at) {
                    due = Some((kind, timer.next_due));
                }
            }
        }

        let (kind, _) = due?;
        if let Some(timer) = self.timers[kind.slot()].as_mut() {
            let next = timer.next_due + timer.interval;
            timer.next_due = if next <= now { now + timer.interval } else { next };
        }
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_nothing_due_before_interval() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(TimerKind::Movement, ms(200), start);
        assert_eq!(sched.pop_due(start + ms(199)), None);
        assert_eq!(sched.pop_due(start + ms(200)), Some(TimerKind::Movement));
        assert_eq!(sched.pop_due(start + ms(200)), None);
        assert_eq!(sched.next_deadline(), Some(start + ms(400)));
    }

    #[test]
    fn test_earliest_deadline_fires_first() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(TimerKind::WallClock, ms(1000), start);
        sched.schedule(TimerKind::Autoplay, ms(10), start);
        sched.schedule(TimerKind::Movement, ms(200), start);

        let now = start + ms(1000);
        // Autoplay is most overdue, then movement, then the wall clock
        assert_eq!(sched.pop_due(now), Some(TimerKind::Autoplay));
        assert_eq!(sched.pop_due(now), Some(TimerKind::Movement));
        assert_eq!(sched.pop_due(now), Some(TimerKind::WallClock));
    }

    #[test]
    fn test_ties_follow_kind_order() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(TimerKind::Autoplay, ms(100), start);
        sched.schedule(TimerKind::WallClock, ms(100), start);
        sched.schedule(TimerKind::Movement, ms(100), start);
        let now = start + ms(100);
        assert_eq!(sched.pop_due(now), Some(TimerKind::Movement));
        assert_eq!(sched.pop_due(now), Some(TimerKind::WallClock));
        assert_eq!(sched.pop_due(now), Some(TimerKind::Autoplay));
    }

    #[test]
    fn test_reschedule_restarts_phase() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(TimerKind::Movement, ms(200), start);
        // Speed change at t=150: the next tick is 125ms later, not at t=200
        sched.schedule(TimerKind::Movement, ms(125), start + ms(150));
        assert_eq!(sched.pop_due(start + ms(200)), None);
        assert_eq!(sched.pop_due(start + ms(275)), Some(TimerKind::Movement));
        assert_eq!(sched.interval(TimerKind::Movement), Some(ms(125)));
    }

    #[test]
    fn test_no_drift_between_firings() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(TimerKind::WallClock, ms(1000), start);
        // Fired a little late each time, deadlines stay on the 1s grid
        assert_eq!(sched.pop_due(start + ms(1030)), Some(TimerKind::WallClock));
        assert_eq!(sched.next_deadline(), Some(start + ms(2000)));
        assert_eq!(sched.pop_due(start + ms(2010)), Some(TimerKind::WallClock));
        assert_eq!(sched.next_deadline(), Some(start + ms(3000)));
    }

    #[test]
    fn test_stalled_timer_reanchors() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(TimerKind::Movement, ms(100), start);
        let late = start + ms(5000);
        assert_eq!(sched.pop_due(late), Some(TimerKind::Movement));
        assert_eq!(sched.pop_due(late), None);
        assert_eq!(sched.next_deadline(), Some(late + ms(100)));
    }

    #[test]
    fn test_cancel_all_stops_everything() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        for kind in TimerKind::ALL {
            sched.schedule(kind, ms(10), start);
        }
        sched.cancel_all();
        for kind in TimerKind::ALL {
            assert!(!sched.is_active(kind));
        }
        assert_eq!(sched.next_deadline(), None);
        assert_eq!(sched.pop_due(start + ms(1000)), None);
    }

    #[test]
    fn test_cancel_single_timer() {
        let start = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(TimerKind::Autoplay, ms(10), start);
        sched.schedule(TimerKind::Movement, ms(200), start);
        sched.cancel(TimerKind::Autoplay);
        assert!(!sched.is_active(TimerKind::Autoplay));
        assert!(sched.is_active(TimerKind::Movement));
        assert_eq!(sched.pop_due(start + ms(50)), None);
    }
}
