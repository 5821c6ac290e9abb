//! Per-limit request history.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Timestamps of recently admitted requests for one limit, oldest first.
///
/// Expired entries are purged lazily whenever the ledger is consulted, never
/// on a timer. Mutation always happens under the gate's exclusive lock.
#[derive(Debug, Default)]
pub(crate) struct RequestLedger {
    stamps: VecDeque<Instant>,
}

impl RequestLedger {
    pub(crate) fn new() -> Self {
        Self {
            stamps: VecDeque::new(),
        }
    }

    /// Drop every timestamp strictly older than `window` before `now`.
    pub(crate) fn purge_expired(&mut self, now: Instant, window: Duration) {
        while let Some(oldest) = self.stamps.front() {
            if now.duration_since(*oldest) > window {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Append an admission timestamp. Timestamps arrive in monotonic order.
    pub(crate) fn record(&mut self, stamp: Instant) {
        self.stamps.push_back(stamp);
    }

    pub(crate) fn len(&self) -> usize {
        self.stamps.len()
    }

    pub(crate) fn oldest(&self) -> Option<Instant> {
        self.stamps.front().copied()
    }
}
