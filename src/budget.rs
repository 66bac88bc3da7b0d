//! Shared wall-clock budget for a round of upstream fetches

use std::time::{Duration, Instant};

/// Remaining time for one aggregation round
///
/// A budget is a start instant plus a maximum. It is `Copy`, so every fetch task
/// receives its own value and nobody writes to it after creation; the remaining
/// time shrinks only because the clock moves. A task reads [`Budget::dispatch_timeout`]
/// at the moment it is about to send its request and uses that as its timeout.
#[derive(Clone, Copy, Debug)]
pub struct Budget {
    started: Instant,
    maximum: Duration,
}

impl Budget {
    /// Start a budget of `maximum` now
    pub fn start(maximum: Duration) -> Self {
        Self::started_at(Instant::now(), maximum)
    }

    /// A budget that began counting down at `started`
    pub fn started_at(started: Instant, maximum: Duration) -> Self {
        Self { started, maximum }
    }

    /// The budget this round started with
    pub fn maximum(&self) -> Duration {
        self.maximum
    }

    /// Time spent since the round started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left, saturating at zero
    pub fn remaining(&self) -> Duration {
        self.maximum.saturating_sub(self.elapsed())
    }

    /// Whether no time is left
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Timeout for a request dispatched right now, or `None` if it must be skipped
    pub fn dispatch_timeout(&self) -> Option<Duration> {
        let remaining = self.remaining();
        (!remaining.is_zero()).then_some(remaining)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_budget_offers_about_the_full_maximum() {
        let budget = Budget::start(Duration::from_millis(500));
        let timeout = budget.dispatch_timeout().expect("fresh budget is not exhausted");

        assert!(timeout <= Duration::from_millis(500));
        assert!(timeout > Duration::from_millis(400));
        assert_eq!(budget.maximum(), Duration::from_millis(500));
    }

    #[test]
    fn test_late_dispatch_gets_what_is_left() {
        let started = Instant::now()
            .checked_sub(Duration::from_millis(300))
            .expect("clock far enough from its origin");
        let budget = Budget::started_at(started, Duration::from_millis(500));

        let timeout = budget.dispatch_timeout().expect("200ms should remain");
        assert!(timeout <= Duration::from_millis(200));
        assert!(budget.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn test_overrun_budget_skips_dispatch() {
        let started = Instant::now()
            .checked_sub(Duration::from_millis(600))
            .expect("clock far enough from its origin");
        let budget = Budget::started_at(started, Duration::from_millis(500));

        assert!(budget.is_exhausted());
        assert_eq!(budget.remaining(), Duration::ZERO);
        assert_eq!(budget.dispatch_timeout(), None);
    }

    #[test]
    fn test_zero_budget_is_exhausted_immediately() {
        let budget = Budget::start(Duration::ZERO);
        assert!(budget.is_exhausted());
        assert!(budget.dispatch_timeout().is_none());
    }

    #[test]
    fn test_copies_share_the_same_clock() {
        let budget = Budget::start(Duration::from_secs(1));
        let copy = budget;
        std::thread::sleep(Duration::from_millis(20));
        assert!(copy.remaining() <= Duration::from_millis(980));
        assert!(budget.remaining() <= Duration::from_millis(980));
    }
}
