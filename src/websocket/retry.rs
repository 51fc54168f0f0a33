//! Reconnect bookkeeping.
//!
//! Every reconnect waits the same configured interval. After a fixed
//! number of attempts no further delay is handed out until
//! [`RetryPolicy::reset`] is called.

use std::time::Duration;

use crate::config::FeedConfig;

/// Bounded, fixed-interval reconnect policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
    attempts: u32,
}

impl RetryPolicy {
    /// Creates a policy allowing `max_attempts` reconnects `interval` apart.
    /// Zero attempts disables automatic reconnection.
    #[must_use]
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            attempts: 0,
        }
    }

    #[must_use]
    pub const fn from_feed_config(config: &FeedConfig) -> Self {
        Self::new(config.reconnect_attempts, config.reconnect_interval)
    }

    /// Consumes one attempt and returns the delay before it, or `None` once
    /// the attempts are used up.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        Some(self.interval)
    }

    /// Restores the full attempt budget.
    pub const fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Attempts consumed since the last reset.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
