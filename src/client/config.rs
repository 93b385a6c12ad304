use super::timeout::{DEFAULT_GROWTH, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS};
use crate::base::neterror::NetError;
use serde::{Deserialize, Serialize};

/// Default relay base, matching the relay's default listen address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/";

/// Largest accepted `max_timeout_ms` (one day).
pub const TIMEOUT_CEILING_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Resolution client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Relay base URL; `resolve` is appended as a path segment.
    pub base_url: String,
    /// Starting adaptive timeout in milliseconds.
    pub initial_timeout_ms: f64,
    /// Ceiling for the adaptive timeout in milliseconds.
    pub max_timeout_ms: f64,
    /// Factor applied to the timeout after each timed-out request.
    pub timeout_growth: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            initial_timeout_ms: DEFAULT_TIMEOUT_MS,
            max_timeout_ms: MAX_TIMEOUT_MS,
            timeout_growth: DEFAULT_GROWTH,
        }
    }
}

impl ClientConfig {
    /// Reject timeout settings that would let the adaptive timeout shrink
    /// or overflow a `Duration`.
    ///
    /// Requires finite values with `0 < initial <= max <= TIMEOUT_CEILING_MS`
    /// and `growth >= 1`.
    pub fn validate(&self) -> Result<(), NetError> {
        let (initial, max, growth) = (
            self.initial_timeout_ms,
            self.max_timeout_ms,
            self.timeout_growth,
        );

        if !(initial.is_finite() && max.is_finite() && growth.is_finite()) {
            return Err(NetError::Config(
                "timeout settings must be finite numbers".to_string(),
            ));
        }
        if initial <= 0.0 || initial > max {
            return Err(NetError::Config(format!(
                "initial_timeout_ms must be in (0, max_timeout_ms], got {} (max {})",
                initial, max
            )));
        }
        if max > TIMEOUT_CEILING_MS {
            return Err(NetError::Config(format!(
                "max_timeout_ms must not exceed {}, got {}",
                TIMEOUT_CEILING_MS, max
            )));
        }
        if growth < 1.0 {
            return Err(NetError::Config(format!(
                "timeout_growth must be at least 1.0, got {}",
                growth
            )));
        }
        Ok(())
    }
}
