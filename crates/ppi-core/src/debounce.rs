#![forbid(unsafe_code)]

//! Single-shot, re-armable debounce timer.
//!
//! Bursts of input collapse into one action: every [`arm`](DebounceTimer::arm)
//! pushes the deadline out, and [`fire`](DebounceTimer::fire) reports `true`
//! exactly once after a quiet period elapses with no further arms. Timers are
//! re-armed, never queued.
//!
//! All methods take an explicit [`Instant`] so the timer is deterministic
//! under test; no method reads the clock itself.

use web_time::{Duration, Instant};

/// Quiet period shared by the calibration slider and the filter panel.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct DebounceTimer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// A timer with the default 300ms quiet period.
    pub fn new() -> Self {
        Self::with_quiet_period(DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// (Re)arm the timer: the deadline moves to `now + quiet period`,
    /// superseding any pending deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Fire if the deadline has passed. Returns `true` at most once per arm.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline without firing. Used on teardown.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, for hosts that schedule wakeups.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new();
        timer.arm(t0);
        assert!(!timer.fire(t0 + ms(299)));
        assert!(timer.fire(t0 + ms(300)));
        // Already consumed.
        assert!(!timer.fire(t0 + ms(400)));
    }

    #[test]
    fn rearming_pushes_the_deadline_out() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new();
        timer.arm(t0);
        timer.arm(t0 + ms(200));
        assert!(!timer.fire(t0 + ms(300)));
        assert!(!timer.fire(t0 + ms(499)));
        assert!(timer.fire(t0 + ms(500)));
    }

    #[test]
    fn burst_of_arms_collapses_to_one_fire() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new();
        let mut fired = 0;
        for i in 0..10 {
            timer.arm(t0 + ms(i * 20));
            if timer.fire(t0 + ms(i * 20)) {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);
        assert!(timer.fire(t0 + ms(9 * 20 + 300)));
        fired += 1;
        assert!(!timer.fire(t0 + ms(9 * 20 + 600)));
        assert_eq!(fired, 1);
    }

    #[test]
    fn cancel_suppresses_pending_fire() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new();
        timer.arm(t0);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.fire(t0 + ms(1000)));
    }
}
