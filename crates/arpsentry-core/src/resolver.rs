//! # Binding Resolver
//!
//! Derives "valid binding" answers from binding-statement candidates.
//!
//! The derivation is a replaceable strategy: the default recency policy is
//! documented behavior, not a guaranteed reproduction of whatever richer
//! rule set (explicit invalidation, quorum) a deployment may require.
//! Stronger policies implement `BindingAuthorityPolicy` and slot in
//! without touching the store or the engine.

use crate::query::{BindingPattern, Candidates, QueryEngine};
use crate::store::AssertionStore;
use crate::{BindingStatement, MediaAddr, NetAddr, Timestamp};

// =============================================================================
// AUTHORITY POLICY
// =============================================================================

/// Strategy deciding which candidate binding, if any, is authoritative at
/// a given time.
///
/// Candidates arrive in store order (most recently asserted first);
/// implementations must treat a miss as a normal `None` outcome.
pub trait BindingAuthorityPolicy {
    /// Pick the authoritative media address among candidates for a
    /// network-address lookup.
    fn resolve_media(
        &self,
        candidates: &Candidates<BindingStatement>,
        time: Timestamp,
    ) -> Option<MediaAddr>;

    /// Pick the authoritative network address among candidates for a
    /// media-address lookup.
    fn resolve_network(
        &self,
        candidates: &Candidates<BindingStatement>,
        time: Timestamp,
    ) -> Option<NetAddr>;
}

/// Default temporal-authority policy.
///
/// Among candidates with `asserted_at <= time`, the first in store order
/// wins, i.e. the most recently asserted match. Equal timestamps also go
/// to the most recently asserted statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecencyAuthority;

impl RecencyAuthority {
    fn first_valid<'a>(
        candidates: &'a Candidates<BindingStatement>,
        time: Timestamp,
    ) -> Option<&'a BindingStatement> {
        candidates.facts().iter().find(|s| s.asserted_at <= time)
    }
}

impl BindingAuthorityPolicy for RecencyAuthority {
    fn resolve_media(
        &self,
        candidates: &Candidates<BindingStatement>,
        time: Timestamp,
    ) -> Option<MediaAddr> {
        Self::first_valid(candidates, time).map(|s| s.media.clone())
    }

    fn resolve_network(
        &self,
        candidates: &Candidates<BindingStatement>,
        time: Timestamp,
    ) -> Option<NetAddr> {
        Self::first_valid(candidates, time).map(|s| s.network.clone())
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Resolves address bindings against a store through a bounded query and
/// an authority policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindingResolver<P = RecencyAuthority> {
    engine: QueryEngine,
    policy: P,
}

impl BindingResolver<RecencyAuthority> {
    /// Create a resolver with the default recency policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            engine: QueryEngine::new(),
            policy: RecencyAuthority,
        }
    }
}

impl<P: BindingAuthorityPolicy> BindingResolver<P> {
    /// Create a resolver with a custom authority policy.
    #[must_use]
    pub const fn with_policy(policy: P) -> Self {
        Self {
            engine: QueryEngine::new(),
            policy,
        }
    }

    /// Find the valid media address bound to `network` at `time`.
    ///
    /// `None` means "no known binding", never an error.
    #[must_use]
    pub fn find_media_for_network(
        &self,
        store: &AssertionStore,
        network: &NetAddr,
        time: Timestamp,
    ) -> Option<MediaAddr> {
        let pattern = BindingPattern::for_network(network.clone());
        let candidates = self.engine.binding_candidates(store, &pattern);
        self.policy.resolve_media(&candidates, time)
    }

    /// Find the valid network address bound to `media` at `time`.
    #[must_use]
    pub fn find_network_for_media(
        &self,
        store: &AssertionStore,
        media: &MediaAddr,
        time: Timestamp,
    ) -> Option<NetAddr> {
        let pattern = BindingPattern::for_media(media.clone());
        let candidates = self.engine.binding_candidates(store, &pattern);
        self.policy.resolve_network(&candidates, time)
    }
}

// =============================================================================
// TESTS
// =============================================================================
