//! Value Objects for Peer Liveness

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::LivenessError;

/// Result of XOR distance calculation between two nodes
///
/// The distance is measured as the index of the first differing bit
/// when comparing two NodeIds via XOR. Range is 0-255 (for 256-bit NodeIds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(pub u8);

impl Distance {
    /// Create a new Distance value
    pub fn new(bucket_index: u8) -> Self {
        Self(bucket_index)
    }

    /// Get the bucket index (0-255)
    pub fn bucket_index(&self) -> u8 {
        self.0
    }

    /// Maximum possible distance (used as sentinel value)
    pub fn max() -> Self {
        Self(255)
    }
}

/// Configuration for the liveness subsystem.
///
/// # Pending marks
///
/// `max_pending_secs` bounds how long a handshake mark may survive. Marks
/// are stamped in whole seconds, so a mark can look up to one second older
/// than it is. The window must exceed `hello_timeout_ms` by at least one
/// second, otherwise a mark could be expired while its attempt is still in
/// flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Bucket size (default: 20)
    pub k: usize,
    /// Timeout for a single outbound Hello (default: 5000 ms)
    pub hello_timeout_ms: u64,
    /// Interval between outbound rounds (default: 30 s)
    pub round_interval_secs: u64,
    /// Maximum age of a pending mark before it is treated as stale (default: 30 s)
    pub max_pending_secs: u64,
    /// Maximum number of simultaneous pending marks (default: 1024)
    pub max_pending: usize,
    /// Maximum outbound Hellos in flight during one round (default: 16)
    pub max_concurrent_hellos: usize,
    /// Version string reported in our own `AliveStatus`
    pub node_version: String,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            k: 20,
            hello_timeout_ms: 5_000,
            round_interval_secs: 30,
            max_pending_secs: 30,
            max_pending: 1024,
            max_concurrent_hellos: 16,
            node_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl LivenessConfig {
    /// Create a config suitable for testing (smaller values)
    pub fn for_testing() -> Self {
        Self {
            k: 3, // Smaller buckets for easier testing
            hello_timeout_ms: 200,
            round_interval_secs: 1,
            max_pending_secs: 2,
            max_pending: 16,
            max_concurrent_hellos: 4,
            node_version: "test".to_string(),
        }
    }

    /// Outbound Hello timeout as a `Duration`.
    pub fn hello_timeout(&self) -> Duration {
        Duration::from_millis(self.hello_timeout_ms)
    }

    /// Round interval as a `Duration`.
    pub fn round_interval(&self) -> Duration {
        Duration::from_secs(self.round_interval_secs)
    }

    /// Check the configuration for values the service cannot run with.
    pub fn validate(&self) -> Result<(), LivenessError> {
        if self.k == 0 {
            return Err(LivenessError::Config("k must be greater than 0".into()));
        }
        if self.hello_timeout_ms == 0 {
            return Err(LivenessError::Config(
                "hello_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.round_interval_secs == 0 {
            return Err(LivenessError::Config(
                "round_interval_secs must be greater than 0".into(),
            ));
        }
        if self.max_pending == 0 {
            return Err(LivenessError::Config(
                "max_pending must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_hellos == 0 {
            return Err(LivenessError::Config(
                "max_concurrent_hellos must be greater than 0".into(),
            ));
        }
        if self.max_pending_secs.saturating_mul(1000)
            < self.hello_timeout_ms.saturating_add(1000)
        {
            return Err(LivenessError::Config(format!(
                "max_pending_secs ({}s) must exceed hello_timeout_ms ({}ms) by at least 1s",
                self.max_pending_secs, self.hello_timeout_ms
            )));
        }
        Ok(())
    }
}
