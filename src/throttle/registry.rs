//! Active limit set and its ledger store.

use std::collections::HashMap;

use super::ledger::RequestLedger;
use super::limit::{LimitId, RateLimit};

/// The currently enforced limits paired with their request ledgers.
///
/// The active set keeps the caller-supplied order, which is the order limits
/// are evaluated in per call. The whole registry sits behind a single
/// reader-writer lock owned by the `Throttler`; any ledger mutation requires
/// the write half.
#[derive(Debug, Default)]
pub(crate) struct LimitRegistry {
    /// Enforced limits, in evaluation order
    active: Vec<RateLimit>,
    /// Request ledgers indexed by limit identity
    ledgers: HashMap<LimitId, RequestLedger>,
}

impl LimitRegistry {
    /// Create a registry with a fresh empty ledger per limit.
    pub(crate) fn new(limits: Vec<RateLimit>) -> Self {
        let mut registry = Self::default();
        registry.replace(limits);
        registry
    }

    /// Independent copy of the active set, in evaluation order.
    ///
    /// A concurrent replacement cannot mutate the collection a caller is
    /// iterating.
    pub(crate) fn snapshot(&self) -> Vec<RateLimit> {
        self.active.clone()
    }

    pub(crate) fn ledger_mut(&mut self, id: LimitId) -> Option<&mut RequestLedger> {
        self.ledgers.get_mut(&id)
    }

    /// Swap in a new active set.
    ///
    /// Limits carried over from the previous set (same identity) keep their
    /// ledgers untouched, limits no longer present have their ledgers
    /// discarded, and newly added limits start with an empty ledger.
    pub(crate) fn replace(&mut self, limits: Vec<RateLimit>) {
        let mut previous = std::mem::take(&mut self.ledgers);
        for limit in &limits {
            let ledger = previous.remove(&limit.id()).unwrap_or_else(RequestLedger::new);
            self.ledgers.entry(limit.id()).or_insert(ledger);
        }
        self.active = limits;
    }

    /// Number of active limits.
    pub(crate) fn len(&self) -> usize {
        self.active.len()
    }
}
