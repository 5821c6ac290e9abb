//! The admission gate wrapping a throttled action.

use std::future::Future;
use std::marker::PhantomData;

use parking_lot::RwLock;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use super::limit::RateLimit;
use super::registry::LimitRegistry;
use crate::error::{FloodgateError, Result};

/// An admission gate that runs an asynchronous action under a set of
/// sliding-window rate limits.
///
/// Every call to [`Throttler::perform`] checks each active limit in its
/// configured order, waiting where a window is full, then runs the action
/// exactly once and records the call against every limit it was checked
/// against. The gate is safe to share across tasks; waiting callers never
/// occupy a thread or hold the gate's lock.
///
/// Limits are tracked by instance identity (see [`RateLimit`]), so replacing
/// the active set with clones of the current limits keeps their request
/// history, while structurally identical fresh limits start empty.
pub struct Throttler<In, F> {
    /// The throttled action
    action: F,
    /// Active limits and their ledgers, behind one reader-writer lock
    registry: RwLock<LimitRegistry>,
    _input: PhantomData<fn(In)>,
}

impl<In, F, Fut> Throttler<In, F>
where
    F: Fn(In) -> Fut,
    Fut: Future,
{
    /// Create a gate around `action` enforcing `limits` in the given order.
    ///
    /// An empty limit set means calls are never throttled.
    pub fn new(action: F, limits: Vec<RateLimit>) -> Self {
        Self {
            action,
            registry: RwLock::new(LimitRegistry::new(limits)),
            _input: PhantomData,
        }
    }

    /// Run the action once `input` has been admitted by every active limit.
    ///
    /// Limits are evaluated sequentially in their configured order, so a wait
    /// incurred for an earlier limit has already elapsed by the time later
    /// limits are checked. A full window suspends the call until its nearest
    /// projected opening; if the window is still at capacity after that single
    /// wait the call fails with [`FloodgateError::RateLimitExceeded`] and the
    /// action is not run. There is no retry loop and no queueing among
    /// waiters.
    ///
    /// On success the action runs exactly once, and one timestamp captured
    /// after it completes is appended to the ledger of every limit evaluated
    /// for this call. On failure no ledger is touched.
    pub async fn perform(&self, input: In) -> Result<Fut::Output> {
        let snapshot = self.registry.read().snapshot();
        trace!(limits = snapshot.len(), "Evaluating admission");

        for limit in &snapshot {
            self.admit(limit).await?;
        }

        let output = (self.action)(input).await;

        let stamp = Instant::now();
        {
            let mut registry = self.registry.write();
            for limit in &snapshot {
                if let Some(ledger) = registry.ledger_mut(limit.id()) {
                    ledger.record(stamp);
                }
            }
        }

        Ok(output)
    }

    /// Check one limit, waiting at most once for its nearest opening.
    async fn admit(&self, limit: &RateLimit) -> Result<()> {
        let wait = {
            let mut registry = self.registry.write();
            let now = Instant::now();

            // A limit removed by a concurrent reconfiguration no longer
            // constrains calls that captured it in their snapshot.
            let Some(ledger) = registry.ledger_mut(limit.id()) else {
                return Ok(());
            };

            ledger.purge_expired(now, limit.window());
            if (ledger.len() as u64) < limit.max_requests() {
                return Ok(());
            }

            let Some(oldest) = ledger.oldest() else {
                return Ok(());
            };
            limit.window().saturating_sub(now.duration_since(oldest))
        };

        debug!(
            max_requests = limit.max_requests(),
            window = ?limit.window(),
            wait = ?wait,
            "Rate limit window full, waiting for the next opening"
        );

        // The lock is released here; any number of other calls may proceed
        // while this one sleeps.
        sleep(wait).await;

        let mut registry = self.registry.write();
        match registry.ledger_mut(limit.id()) {
            Some(ledger) if (ledger.len() as u64) >= limit.max_requests() => {
                debug!(
                    max_requests = limit.max_requests(),
                    window = ?limit.window(),
                    "Rate limit exceeded"
                );
                Err(FloodgateError::RateLimitExceeded {
                    max_requests: limit.max_requests(),
                    window: limit.window(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Replace the active limit set.
    ///
    /// Takes effect for calls that start afterward; calls already past their
    /// snapshot complete against the limits they captured. Limits present in
    /// both the old and the new set keep their request history; removed limits
    /// have their ledgers discarded and new limits start empty.
    pub fn update_rate_limits(&self, limits: Vec<RateLimit>) {
        debug!(limits = limits.len(), "Replacing active rate limits");
        self.registry.write().replace(limits);
    }

    /// Number of currently active limits.
    pub fn active_limit_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Recorded admissions still inside `limit`'s window, or `None` if the
    /// limit is not active.
    ///
    /// This is primarily useful for testing and diagnostics.
    pub fn recorded_count(&self, limit: &RateLimit) -> Option<usize> {
        let mut registry = self.registry.write();
        let now = Instant::now();
        let ledger = registry.ledger_mut(limit.id())?;
        ledger.purge_expired(now, limit.window());
        Some(ledger.len())
    }
}
