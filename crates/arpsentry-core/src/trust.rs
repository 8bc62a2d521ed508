//! # Trust Evaluator
//!
//! Derives "trusted" answers from trust-statement candidates.
//!
//! The default policy is recency-only: a system is trusted at time T iff
//! some trust statement for it was asserted at or before T. There is no
//! expiry or revocation in the default; deployments needing revocation
//! windows, quorum or chain-of-custody implement `TrustPolicy`.

use crate::query::{Candidates, QueryEngine, TrustPattern};
use crate::store::AssertionStore;
use crate::{SystemId, Timestamp, TrustStatement};

// =============================================================================
// TRUST POLICY
// =============================================================================

/// Strategy deciding whether the candidate trust statements establish
/// trust at a given time.
///
/// Candidates arrive in store order (most recently asserted first).
pub trait TrustPolicy {
    /// Evaluate trust from the candidate set.
    fn evaluate(&self, candidates: &Candidates<TrustStatement>, time: Timestamp) -> bool;
}

/// Default recency-only trust policy.
///
/// Trusted iff any statement for the system has `asserted_at <= time`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecencyTrust;

impl TrustPolicy for RecencyTrust {
    fn evaluate(&self, candidates: &Candidates<TrustStatement>, time: Timestamp) -> bool {
        candidates.facts().iter().any(|s| s.asserted_at <= time)
    }
}

// =============================================================================
// EVALUATOR
// =============================================================================

/// Answers "is system S trusted at time T?" through a bounded query and a
/// trust policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustEvaluator<P = RecencyTrust> {
    engine: QueryEngine,
    policy: P,
}

impl TrustEvaluator<RecencyTrust> {
    /// Create an evaluator with the default recency policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            engine: QueryEngine::new(),
            policy: RecencyTrust,
        }
    }
}

impl<P: TrustPolicy> TrustEvaluator<P> {
    /// Create an evaluator with a custom trust policy.
    #[must_use]
    pub const fn with_policy(policy: P) -> Self {
        Self {
            engine: QueryEngine::new(),
            policy,
        }
    }

    /// Determine whether `system` is trusted at `time`.
    #[must_use]
    pub fn is_trusted(&self, store: &AssertionStore, system: &SystemId, time: Timestamp) -> bool {
        let pattern = TrustPattern::for_system(system.clone());
        let candidates = self.engine.trust_candidates(store, &pattern);
        self.policy.evaluate(&candidates, time)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trusted_iff_statement_not_newer_than_query_time() {
        let mut store = AssertionStore::new();
        store.assert_trust(SystemId::new("sysA"), Timestamp::new(10));

        let evaluator = TrustEvaluator::new();
        let sys = SystemId::new("sysA");
        assert!(evaluator.is_trusted(&store, &sys, Timestamp::new(10)));
        assert!(evaluator.is_trusted(&store, &sys, Timestamp::new(11)));
        assert!(!evaluator.is_trusted(&store, &sys, Timestamp::new(9)));
    }

    #[test]
    fn unknown_system_is_untrusted() {
        let store = AssertionStore::new();
        let evaluator = TrustEvaluator::new();
        assert!(!evaluator.is_trusted(&store, &SystemId::new("ghost"), Timestamp::new(100)));
    }

    #[test]
    fn trust_is_per_system() {
        let mut store = AssertionStore::new();
        store.assert_trust(SystemId::new("sysA"), Timestamp::new(1));

        let evaluator = TrustEvaluator::new();
        assert!(evaluator.is_trusted(&store, &SystemId::new("sysA"), Timestamp::new(5)));
        assert!(!evaluator.is_trusted(&store, &SystemId::new("sysB"), Timestamp::new(5)));
    }

    #[test]
    fn custom_policy_replaces_default() {
        /// Trust expires `window` ticks after the newest valid statement.
        struct ExpiringTrust {
            window: u64,
        }

        impl TrustPolicy for ExpiringTrust {
            fn evaluate(&self, candidates: &Candidates<TrustStatement>, time: Timestamp) -> bool {
                candidates.facts().iter().any(|s| {
                    s.asserted_at <= time
                        && time.value().saturating_sub(s.asserted_at.value()) <= self.window
                })
            }
        }

        let mut store = AssertionStore::new();
        store.assert_trust(SystemId::new("sysA"), Timestamp::new(10));

        let evaluator = TrustEvaluator::with_policy(ExpiringTrust { window: 5 });
        let sys = SystemId::new("sysA");
        assert!(evaluator.is_trusted(&store, &sys, Timestamp::new(12)));
        assert!(!evaluator.is_trusted(&store, &sys, Timestamp::new(20)));
    }
}
