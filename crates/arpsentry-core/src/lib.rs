//! # arpsentry-core
//!
//! The deterministic trust-decision engine for arpsentry - THE LOGIC.
//!
//! This crate is the assertion store and query-resolution engine behind a
//! host-based ARP-spoofing defense daemon. The surrounding daemon observes
//! network traffic and asks two questions:
//!
//! - is system S currently trusted?
//! - what is the currently valid hardware/network-address binding for
//!   address A?
//!
//! The answers derive from a growing, append-only history of timestamped
//! assertions under a deterministic "most recently asserted match, not
//! newer than the query time, wins" policy.
//!
//! ## Architectural Constraints
//!
//! - The store is the ONLY place where facts exist (append-only, never
//!   mutated, released only at shutdown)
//! - Every enumeration is bounded; the lookup hot path must never block
//!   indefinitely on untrusted network input
//! - Fail-closed: disablement, shutdown and doubt all answer "untrusted"
//! - No async, no network dependencies, no process termination from
//!   library code (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod engine;
pub mod primitives;
pub mod query;
pub mod resolver;
pub mod store;
pub mod trust;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    BindingStatement, EngineError, MediaAddr, NetAddr, SystemId, Timestamp, TrustStatement,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use engine::{EngineState, LogicEngine};
pub use query::{BindingPattern, Candidates, QueryEngine, TrustPattern};
pub use resolver::{BindingAuthorityPolicy, BindingResolver, RecencyAuthority};
pub use store::AssertionStore;
pub use trust::{RecencyTrust, TrustEvaluator, TrustPolicy};
