use std::time::Instant;

/// Gates simulation ticks independently of the render frame rate.
///
/// The interval is passed on every check because the game shortens it as
/// the score grows.
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    last_fired: Instant,
}

impl TickTimer {
    pub fn new(start: Instant) -> Self {
        Self { last_fired: start }
    }

    pub fn start_now() -> Self {
        Self::new(Instant::now())
    }

    /// Returns true, and restarts the countdown, once `interval` seconds
    /// have passed since the last tick
    pub fn elapsed(&mut self, interval: f64) -> bool {
        self.elapsed_at(Instant::now(), interval)
    }

    pub fn elapsed_at(&mut self, now: Instant, interval: f64) -> bool {
        let waited = now.saturating_duration_since(self.last_fired).as_secs_f64();
        if waited >= interval {
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::start_now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fires_after_interval() {
        let start = Instant::now();
        let mut timer = TickTimer::new(start);

        assert!(!timer.elapsed_at(start + Duration::from_millis(100), 0.2));
        assert!(timer.elapsed_at(start + Duration::from_millis(200), 0.2));
        // Countdown restarts from the tick that fired
        assert!(!timer.elapsed_at(start + Duration::from_millis(350), 0.2));
        assert!(timer.elapsed_at(start + Duration::from_millis(400), 0.2));
    }

    #[test]
    fn test_shorter_interval_takes_effect_immediately() {
        let start = Instant::now();
        let mut timer = TickTimer::new(start);

        assert!(!timer.elapsed_at(start + Duration::from_millis(170), 0.2));
        assert!(timer.elapsed_at(start + Duration::from_millis(170), 0.16));
    }

    #[test]
    fn test_clock_going_backwards_does_not_fire() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut timer = TickTimer::new(start);

        assert!(!timer.elapsed_at(start - Duration::from_millis(500), 0.2));
    }
}
