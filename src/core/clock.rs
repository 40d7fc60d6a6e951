//! Wall-clock timer for pipeline stages.

use std::time::{Duration, Instant};

/// Measures total run time.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    started: Option<Instant>,
    stopped_at: Option<Duration>,
}

impl Clock {
    /// Create a new clock (not started).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and start a new clock.
    pub fn start_new() -> Self {
        let mut clock = Self::new();
        clock.start();
        clock
    }

    /// Start (or restart) the clock.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.stopped_at = None;
    }

    /// Stop the clock, freezing the elapsed time.
    pub fn stop(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.stopped_at = Some(elapsed);
        elapsed
    }

    /// Time since start, or the frozen value once stopped. Zero if never started.
    pub fn elapsed(&self) -> Duration {
        match (self.stopped_at, self.started) {
            (Some(frozen), _) => frozen,
            (None, Some(start)) => start.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_stopped() {
        let clock = Clock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_stop_freezes_elapsed() {
        let mut clock = Clock::start_new();
        std::thread::sleep(Duration::from_millis(2));
        let frozen = clock.stop();
        assert!(frozen >= Duration::from_millis(2));
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.elapsed(), frozen);
    }
}
