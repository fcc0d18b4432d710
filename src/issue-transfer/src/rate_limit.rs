//! Request pacing for the destination API.
//!
//! Every mutating call is followed by a fixed pause. The pause does not look
//! at the quota the provider reports.

use std::time::Duration;
use tracing::trace;

/// Pause awaited after every mutating call.
pub const GOVERNED_DELAY: Duration = Duration::from_millis(1000);

/// Inserts the governed delay between mutating calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateGovernor {
    delay: Duration,
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl RateGovernor {
    /// Creates a governor using [`GOVERNED_DELAY`].
    pub fn new() -> Self {
        Self {
            delay: GOVERNED_DELAY,
        }
    }

    /// Creates a governor with a custom delay, for embedders.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the governed delay.
    pub async fn pause(&self) {
        trace!(delay_ms = self.delay.as_millis() as u64, "Pacing");
        tokio::time::sleep(self.delay).await;
    }
}
