//! Time-window gate for retrying failed queries

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Lets an action through at most once per `window`.
///
/// The first trigger in a window fires immediately and starts the window;
/// triggers inside a running window are dropped, not queued.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    last_fired: Cell<Option<Instant>>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: Cell::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` when the action may run at `now`.
    pub fn try_fire(&self, now: Instant) -> bool {
        if let Some(last) = self.last_fired.get() {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_fired.set(Some(now));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_trigger_fires() {
        let throttle = Throttle::new(Duration::from_millis(1000));
        assert!(throttle.try_fire(Instant::now()));
    }

    #[test]
    fn test_triggers_within_window_are_dropped() {
        let throttle = Throttle::new(Duration::from_millis(1000));
        let start = Instant::now();

        let fired = (0..5u64)
            .filter(|i| throttle.try_fire(start + Duration::from_millis(*i * 50)))
            .count();
        assert_eq!(fired, 1);

        assert!(!throttle.try_fire(start + Duration::from_millis(999)));
        assert!(throttle.try_fire(start + Duration::from_millis(1200)));
        assert!(!throttle.try_fire(start + Duration::from_millis(1300)));
    }

    #[test]
    fn test_window_is_measured_from_last_fire() {
        let throttle = Throttle::new(Duration::from_millis(100));
        let start = Instant::now();

        assert!(throttle.try_fire(start));
        assert!(!throttle.try_fire(start + Duration::from_millis(90)));
        // a dropped trigger does not extend the window
        assert!(throttle.try_fire(start + Duration::from_millis(100)));
    }
}
