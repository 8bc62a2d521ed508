//! # Core Type Definitions
//!
//! This module contains all core types for the arpsentry assertion engine:
//! - Address and identity newtypes (`SystemId`, `MediaAddr`, `NetAddr`)
//! - The timestamp type (`Timestamp`)
//! - Immutable fact types (`TrustStatement`, `BindingStatement`)
//! - Error types (`EngineError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering
//! - Use saturating arithmetic for time to prevent overflow

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Opaque integer timestamp attached to every assertion.
///
/// Totally ordered and comparable; the engine never interprets the value
/// beyond ordering, so callers may feed wall-clock seconds or a monotonic
/// counter as long as they are consistent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The zero timestamp (earliest representable time).
    pub const ZERO: Self = Self(0);

    /// Create a new timestamp with the given value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw timestamp value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The next timestamp, saturating at the maximum representable time.
    #[must_use]
    pub const fn succ(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

// =============================================================================
// IDENTITY & ADDRESS NEWTYPES
// =============================================================================

/// Identifier of a system making or being the subject of a claim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemId(pub String);

impl SystemId {
    /// Create a new system identifier from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hardware (media) address, e.g. a MAC address.
///
/// Compared verbatim: no case or format normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MediaAddr(pub String);

impl MediaAddr {
    /// Create a new media address from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Network (protocol) address, e.g. an IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetAddr(pub String);

impl NetAddr {
    /// Create a new network address from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// FACTS
// =============================================================================

/// A claim that `system` was vouched-for as of `asserted_at`.
///
/// Facts are immutable once recorded; the store never mutates or deletes
/// them individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustStatement {
    /// The system the claim is about.
    pub system: SystemId,
    /// When the claim was made.
    pub asserted_at: Timestamp,
}

impl TrustStatement {
    /// Create a new trust statement.
    #[must_use]
    pub const fn new(system: SystemId, asserted_at: Timestamp) -> Self {
        Self {
            system,
            asserted_at,
        }
    }
}

/// A claim by `system` that `media` ⇄ `network` was a valid binding as of
/// `asserted_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingStatement {
    /// The system that made the binding claim.
    pub system: SystemId,
    /// The hardware address side of the binding.
    pub media: MediaAddr,
    /// The network address side of the binding.
    pub network: NetAddr,
    /// When the claim was made.
    pub asserted_at: Timestamp,
}

impl BindingStatement {
    /// Create a new binding statement.
    #[must_use]
    pub const fn new(
        system: SystemId,
        media: MediaAddr,
        network: NetAddr,
        asserted_at: Timestamp,
    ) -> Self {
        Self {
            system,
            media,
            network,
            asserted_at,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the arpsentry engine.
///
/// - Lookup misses are NOT errors; they are `None`/`false` outcome values
/// - Enumeration overflow is NOT an error; it is logged and the partial
///   result is used
/// - The engine never panics and never terminates the process; fatal
///   conditions are returned to the caller, who decides whether to abort
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine failed to come up or ran out of resources.
    /// A daemon that cannot record trust facts must not continue as if
    /// nothing were tracked, so callers treat this as fatal.
    #[error("Logic engine unavailable: {0}")]
    Unavailable(String),

    /// The engine has been shut down; no further assertions are accepted.
    #[error("Logic engine has been shut down")]
    ShutDown,

    /// A statement field failed validation and was rejected.
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// An I/O error occurred (app-layer trace handling).
    #[error("I/O error: {0}")]
    IoError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// TESTS
// =============================================================================
