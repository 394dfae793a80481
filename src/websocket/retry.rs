use std::time::Duration;

use crate::config::SocketConfig;

/// Bounded fixed-delay reconnection policy.
///
/// The broadcast server expects clients to retry a fixed number of times
/// with a constant delay between attempts, so there is no backoff curve
/// here: `delays()` yields the same delay `max_attempts` times and then the
/// connection is given up as lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of reconnection attempts after a drop
    pub max_attempts: u32,
    /// Delay before each attempt
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Policy configured for this socket
    pub fn from_config(config: &SocketConfig) -> Self {
        Self::new(config.reconnection_attempts, config.reconnection_delay())
    }

    /// The full retry schedule, one delay per permitted attempt
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        std::iter::repeat(self.delay).take(self.max_attempts as usize)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(2))
    }
}
