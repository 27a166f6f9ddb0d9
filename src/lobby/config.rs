//! Matchmaker timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a player may wait before eviction, and how often the
/// orchestration layer should sweep.
///
/// Durations are carried in milliseconds so the struct deserializes from
/// plain config files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakerConfig {
    pub timeout_ms: u64,
    pub sweep_interval_ms: u64,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            sweep_interval_ms: 5_000,
        }
    }
}

impl MatchmakerConfig {
    /// Set the wait timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = duration_ms(timeout);
        self
    }

    /// Set the sweep interval. Must be non-zero.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        let ms = duration_ms(interval);
        assert!(ms > 0, "Sweep interval must be at least 1ms");
        self.sweep_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
