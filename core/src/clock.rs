//! Session clock — turns wall-clock time into accrual seconds.
//!
//! The core never reads the wall clock on its own. The driver (UI timer or
//! the headless runner) calls elapsed_since_last() and feeds the result into
//! GameCommand::Tick, so tests can drive time explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClock {
    pub last_seen: DateTime<Utc>,
    pub paused: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self { last_seen: Utc::now(), paused: false }
    }

    /// Seconds since the previous call, clamped to non-negative.
    /// Returns 0.0 while paused; the pause gap is swallowed on resume.
    pub fn elapsed_since_last(&mut self) -> f64 {
        let now = Utc::now();
        let elapsed = (now - self.last_seen)
            .num_milliseconds()
            .max(0) as f64
            / 1000.0;
        self.last_seen = now;
        if self.paused { 0.0 } else { elapsed }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.last_seen = Utc::now();
        self.paused = false;
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn elapsed_counts_the_gap_since_last_call() {
        let mut clock = SessionClock::new();
        clock.last_seen = Utc::now() - Duration::seconds(5);
        let elapsed = clock.elapsed_since_last();
        assert!((5.0..6.0).contains(&elapsed), "expected ~5s, got {elapsed}");
        // The gap was consumed; an immediate second call sees almost nothing.
        assert!(clock.elapsed_since_last() < 1.0);
    }

    #[test]
    fn a_future_timestamp_clamps_to_zero() {
        let mut clock = SessionClock::new();
        clock.last_seen = Utc::now() + Duration::seconds(60);
        assert_eq!(clock.elapsed_since_last(), 0.0);
    }

    #[test]
    fn paused_clock_yields_nothing_and_resume_swallows_the_gap() {
        let mut clock = SessionClock::new();
        clock.pause();
        clock.last_seen = Utc::now() - Duration::seconds(30);
        assert_eq!(clock.elapsed_since_last(), 0.0);

        clock.last_seen = Utc::now() - Duration::seconds(30);
        clock.resume();
        // resume() re-bases last_seen, so the 30s pause gap never accrues.
        assert!(clock.elapsed_since_last() < 1.0);
        assert!(!clock.paused);
    }
}
