//! Pacing for rate-limited LLM calls

use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Hands out one permit per interval
///
/// The first permit is available one interval after construction and each
/// later permit one interval after the previous one, so `n` acquisitions
/// always span at least `n` intervals. A zero interval never waits.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    next_permit: Instant,
}

impl Throttle {
    /// Create a throttle with the given spacing
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_permit: Instant::now() + interval,
        }
    }

    /// The spacing between permits
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for the next permit
    pub async fn acquire(&mut self) {
        if self.interval.is_zero() {
            return;
        }

        trace!(wait = ?self.next_permit.saturating_duration_since(Instant::now()), "throttle wait");
        sleep_until(self.next_permit).await;

        let now = Instant::now();
        self.next_permit = self.next_permit.max(now) + self.interval;
    }
}
