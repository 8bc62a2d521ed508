//! # Query Engine
//!
//! Bounded pattern-match enumeration over the assertion store.
//!
//! - Patterns match exactly on bound fields and wildcard on unbound ones
//! - Enumeration is capped at `MAX_SOLUTIONS` candidates; on overflow the
//!   partial candidate set is used, not discarded
//! - Overflow is an observability signal, never an error

use crate::primitives::MAX_SOLUTIONS;
use crate::store::AssertionStore;
use crate::{BindingStatement, MediaAddr, NetAddr, SystemId, TrustStatement};

// =============================================================================
// LOGGING HELPER
// =============================================================================

/// Emit a structured overflow warning on stderr.
///
/// The core avoids the tracing dependency to stay minimal; the app layer
/// redirects stderr to its subscriber if needed.
fn warn_overflow(context: &str, cap: usize) {
    eprintln!(
        "{{\"level\":\"warn\",\"target\":\"arpsentry_core::query\",\"message\":\"{} stopped after {} candidates - partial results used\"}}",
        context, cap
    );
}

// =============================================================================
// PATTERNS
// =============================================================================

/// Pattern over trust statements. `None` fields are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustPattern {
    /// Match this system exactly, or any system if `None`.
    pub system: Option<SystemId>,
}

impl TrustPattern {
    /// Match every trust statement.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Match trust statements about one system.
    #[must_use]
    pub fn for_system(system: SystemId) -> Self {
        Self {
            system: Some(system),
        }
    }

    /// Check whether a statement matches this pattern.
    #[must_use]
    pub fn matches(&self, stmt: &TrustStatement) -> bool {
        self.system.as_ref().is_none_or(|s| *s == stmt.system)
    }
}

/// Pattern over binding statements. `None` fields are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingPattern {
    /// Match the asserting system exactly, or any if `None`.
    pub system: Option<SystemId>,
    /// Match the media address exactly, or any if `None`.
    pub media: Option<MediaAddr>,
    /// Match the network address exactly, or any if `None`.
    pub network: Option<NetAddr>,
}

impl BindingPattern {
    /// Match every binding statement.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Match bindings for one network address (media unbound).
    #[must_use]
    pub fn for_network(network: NetAddr) -> Self {
        Self {
            network: Some(network),
            ..Self::default()
        }
    }

    /// Match bindings for one media address (network unbound).
    #[must_use]
    pub fn for_media(media: MediaAddr) -> Self {
        Self {
            media: Some(media),
            ..Self::default()
        }
    }

    /// Check whether a statement matches this pattern.
    #[must_use]
    pub fn matches(&self, stmt: &BindingStatement) -> bool {
        self.system.as_ref().is_none_or(|s| *s == stmt.system)
            && self.media.as_ref().is_none_or(|m| *m == stmt.media)
            && self.network.as_ref().is_none_or(|n| *n == stmt.network)
    }
}

// =============================================================================
// CANDIDATES
// =============================================================================

/// Capped, order-preserving materialization of a store query.
///
/// Facts appear in store order (most recently asserted first). When the
/// enumeration cap was hit, `is_truncated()` reports it; older matches
/// beyond the cap are invisible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates<T> {
    facts: Vec<T>,
    truncated: bool,
}

impl<T> Candidates<T> {
    /// The matched facts in store order.
    #[must_use]
    pub fn facts(&self) -> &[T] {
        &self.facts
    }

    /// Whether enumeration stopped at the cap.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of matched facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Check if no fact matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

// =============================================================================
// QUERY ENGINE
// =============================================================================

/// Wraps store queries with a hard enumeration cap.
///
/// The daemon must never block indefinitely servicing a lookup triggered
/// by untrusted network input, so every enumeration examines at most
/// `cap` matching candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryEngine {
    cap: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEngine {
    /// Create a query engine with the default cap (`MAX_SOLUTIONS`).
    #[must_use]
    pub const fn new() -> Self {
        Self { cap: MAX_SOLUTIONS }
    }

    /// Create a query engine with a custom cap (primarily for tests).
    #[must_use]
    pub const fn with_cap(cap: usize) -> Self {
        Self { cap }
    }

    /// The configured enumeration cap.
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Collect trust candidates matching `pattern`, up to the cap.
    #[must_use]
    pub fn trust_candidates(
        &self,
        store: &AssertionStore,
        pattern: &TrustPattern,
    ) -> Candidates<TrustStatement> {
        collect_capped(store.query_trust(pattern), self.cap, "trust query")
    }

    /// Collect binding candidates matching `pattern`, up to the cap.
    #[must_use]
    pub fn binding_candidates(
        &self,
        store: &AssertionStore,
        pattern: &BindingPattern,
    ) -> Candidates<BindingStatement> {
        collect_capped(store.query_binding(pattern), self.cap, "binding query")
    }
}

/// Drain an enumeration into a capped candidate set.
///
/// Mirrors the break-on-overflow behavior: once `cap` candidates are
/// collected, stop, warn, and proceed with what was found.
fn collect_capped<'a, T: Clone + 'a>(
    iter: impl Iterator<Item = &'a T>,
    cap: usize,
    context: &str,
) -> Candidates<T> {
    let mut facts = Vec::new();
    let mut truncated = false;

    for fact in iter {
        facts.push(fact.clone());
        if facts.len() >= cap {
            truncated = true;
            warn_overflow(context, cap);
            break;
        }
    }

    Candidates { facts, truncated }
}

// =============================================================================
// TESTS
// =============================================================================
