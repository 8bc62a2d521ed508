//! # Assertion Store
//!
//! The append-only fact storage for the arpsentry engine.
//!
//! Facts are kept per predicate kind in assertion order, most-recent-first
//! (assert-at-front semantics). This ordering is load-bearing: the
//! resolution policies rely on "first match in store order" meaning "most
//! recently asserted match".

use crate::query::{BindingPattern, TrustPattern};
use crate::{BindingStatement, MediaAddr, NetAddr, SystemId, Timestamp, TrustStatement};
use std::collections::VecDeque;

/// Append-only, per-predicate-kind collection of timestamped facts.
///
/// Assertion operations are the only writers; queries are read-only and
/// have no effect on the recorded history. A fact is retained until
/// whole-store teardown; it is never individually destroyed.
#[derive(Debug, Clone, Default)]
pub struct AssertionStore {
    /// Trust statements, most recently asserted first.
    trust: VecDeque<TrustStatement>,
    /// Binding statements, most recently asserted first.
    bindings: VecDeque<BindingStatement>,
}

impl AssertionStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // ASSERTION (the only write path)
    // =========================================================================

    /// Prepend a trust statement.
    ///
    /// Infallible at this level: the only failure mode is allocation
    /// exhaustion, which aborts per the store's fail-stop contract.
    pub fn assert_trust(&mut self, system: SystemId, time: Timestamp) {
        self.trust.push_front(TrustStatement::new(system, time));
    }

    /// Prepend a binding statement.
    pub fn assert_binding(
        &mut self,
        system: SystemId,
        media: MediaAddr,
        network: NetAddr,
        time: Timestamp,
    ) {
        self.bindings
            .push_front(BindingStatement::new(system, media, network, time));
    }

    // =========================================================================
    // QUERY (lazy, read-only)
    // =========================================================================

    /// Enumerate trust statements matching `pattern` in store order.
    ///
    /// Lazy, finite and non-restartable; callers wanting a bounded
    /// materialized set go through the query engine's cap.
    pub fn query_trust<'a>(
        &'a self,
        pattern: &'a TrustPattern,
    ) -> impl Iterator<Item = &'a TrustStatement> {
        self.trust.iter().filter(move |stmt| pattern.matches(stmt))
    }

    /// Enumerate binding statements matching `pattern` in store order.
    pub fn query_binding<'a>(
        &'a self,
        pattern: &'a BindingPattern,
    ) -> impl Iterator<Item = &'a BindingStatement> {
        self.bindings
            .iter()
            .filter(move |stmt| pattern.matches(stmt))
    }

    // =========================================================================
    // METRICS & TEARDOWN
    // =========================================================================

    /// Number of recorded trust statements.
    #[must_use]
    pub fn trust_count(&self) -> usize {
        self.trust.len()
    }

    /// Number of recorded binding statements.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Check whether the store holds no facts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trust.is_empty() && self.bindings.is_empty()
    }

    /// Whole-store teardown. The only way facts are ever destroyed.
    pub fn clear(&mut self) {
        self.trust.clear();
        self.bindings.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
