//! Rate limit descriptors.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::{FloodgateError, Result};

static NEXT_LIMIT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one limit, used as the key into the ledger store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LimitId(u64);

/// A single request-rate ceiling: at most `max_requests` admissions within any
/// trailing `window`.
///
/// A limit is identified by the instance, not by its settings. Cloning yields a
/// handle to the same limit, so passing clones back through
/// `Throttler::update_rate_limits` keeps the accumulated request history. A
/// freshly constructed limit with identical settings is a *different* limit
/// and starts from an empty history.
#[derive(Debug, Clone)]
pub struct RateLimit {
    id: LimitId,
    max_requests: u64,
    window: Duration,
}

impl RateLimit {
    /// Create a new limit of `max_requests` per sliding `window`.
    ///
    /// Both values must be positive; anything else is rejected with
    /// [`FloodgateError::InvalidLimit`].
    pub fn new(max_requests: u64, window: Duration) -> Result<Self> {
        if max_requests == 0 {
            return Err(FloodgateError::InvalidLimit(
                "max_requests must be positive".to_string(),
            ));
        }
        if window.is_zero() {
            return Err(FloodgateError::InvalidLimit(
                "window must be a positive duration".to_string(),
            ));
        }

        Ok(Self {
            id: LimitId(NEXT_LIMIT_ID.fetch_add(1, Ordering::Relaxed)),
            max_requests,
            window,
        })
    }

    /// Maximum number of admissions inside one window.
    pub fn max_requests(&self) -> u64 {
        self.max_requests
    }

    /// Length of the sliding window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether `other` is the same limit instance (see the type-level notes on
    /// identity).
    pub fn same_limit(&self, other: &RateLimit) -> bool {
        self.id == other.id
    }

    pub(crate) fn id(&self) -> LimitId {
        self.id
    }
}
