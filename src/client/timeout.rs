//! Session-wide adaptive timeout.
//!
//! Every resolution reads the current value; only a timed-out resolution
//! grows it. The value never shrinks and never exceeds the ceiling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Starting timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: f64 = 5000.0;

/// Ceiling the timeout grows towards, in milliseconds.
pub const MAX_TIMEOUT_MS: f64 = 30000.0;

/// Multiplier applied on each timeout.
pub const DEFAULT_GROWTH: f64 = 1.5;

/// Shared, atomically updated timeout cell.
///
/// Stores the millisecond value as `f64` bits so repeated growth by a
/// fractional factor stays exact (`5000 * 1.5^4 == 25312.5`). Share it
/// between clients with `Arc`.
#[derive(Debug)]
pub struct AdaptiveTimeout {
    current_ms: AtomicU64,
    max_ms: f64,
    growth: f64,
}

impl AdaptiveTimeout {
    /// Create a cell starting at `initial_ms`, growing by `growth` up to `max_ms`.
    ///
    /// Negative (or NaN) bounds are treated as 0, `initial_ms` is clamped to
    /// `max_ms`, and a `growth` below 1.0 is treated as 1.0, so the value can
    /// never decrease. Configuration is checked up front by
    /// [`ClientConfig::validate`](super::ClientConfig::validate).
    pub fn new(initial_ms: f64, max_ms: f64, growth: f64) -> Self {
        let max_ms = max_ms.max(0.0);
        Self {
            current_ms: AtomicU64::new(initial_ms.max(0.0).min(max_ms).to_bits()),
            max_ms,
            growth: growth.max(1.0),
        }
    }

    /// Current value in milliseconds.
    pub fn current_ms(&self) -> f64 {
        f64::from_bits(self.current_ms.load(Ordering::Acquire))
    }

    /// Current value as a `Duration`, saturating at `Duration::MAX`.
    pub fn current(&self) -> Duration {
        Duration::try_from_secs_f64(self.current_ms() / 1000.0).unwrap_or(Duration::MAX)
    }

    /// Upper bound in milliseconds.
    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }

    /// Record a timeout: `new = min(old * growth, max)`. Returns the new value in ms.
    pub fn grow(&self) -> f64 {
        let max_ms = self.max_ms;
        let growth = self.growth;
        let step = |bits: u64| Some((f64::from_bits(bits) * growth).min(max_ms).to_bits());

        // `step` always returns `Some`, so both arms carry the previous value.
        let previous = match self
            .current_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, step)
        {
            Ok(bits) | Err(bits) => bits,
        };
        (f64::from_bits(previous) * growth).min(max_ms)
    }
}

impl Default for AdaptiveTimeout {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS, DEFAULT_GROWTH)
    }
}
