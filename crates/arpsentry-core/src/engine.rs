//! # Engine Lifecycle & Facade
//!
//! The boundary surface the daemon control loop consumes.
//!
//! `LogicEngine` owns the assertion store behind a reader-writer lock and
//! runs it through an explicit state machine:
//!
//! ```text
//! Uninitialized ──start/first-use──▶ Ready ──disable──▶ Disabled
//!        │                            │                    │
//!        └────────disable────────────▶│◀───────────────────┘
//!                                  shutdown
//!                                     ▼
//!                                  ShutDown (terminal)
//! ```
//!
//! - `disable` is monotone: there is no re-enable. While disabled, every
//!   query answers a cheap fail-closed negative without touching the store
//! - Any assert or query observed while `Uninitialized` triggers lazy
//!   initialization first
//! - Fatal conditions are returned as typed errors; the engine never
//!   terminates the process itself

use parking_lot::RwLock;

use crate::primitives::{MAX_MEDIA_ADDR_LENGTH, MAX_NETWORK_ADDR_LENGTH, MAX_SYSTEM_LENGTH};
use crate::resolver::{BindingAuthorityPolicy, BindingResolver, RecencyAuthority};
use crate::store::AssertionStore;
use crate::trust::{RecencyTrust, TrustEvaluator, TrustPolicy};
use crate::{EngineError, MediaAddr, NetAddr, SystemId, Timestamp};

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Lifecycle state of the logic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created but not started; first use initializes lazily.
    Uninitialized,
    /// Recording assertions and answering queries.
    Ready,
    /// Queries answer fail-closed negatives; asserts are dropped.
    /// Monotone: there is no way back to `Ready`.
    Disabled,
    /// Terminal. Store released; asserts are rejected.
    ShutDown,
}

impl EngineState {
    /// Human-readable state name for status output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Disabled => "disabled",
            Self::ShutDown => "shutdown",
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: EngineState,
    store: AssertionStore,
}

// =============================================================================
// LOGIC ENGINE
// =============================================================================

/// The trust-decision engine facade.
///
/// Appends serialize on the write lock; queries take the read lock and
/// collect their capped candidate set under it, so every query observes a
/// consistent prefix of the store as of its start.
#[derive(Debug)]
pub struct LogicEngine<T = RecencyTrust, B = RecencyAuthority> {
    inner: RwLock<Inner>,
    trust: TrustEvaluator<T>,
    resolver: BindingResolver<B>,
}

impl Default for LogicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicEngine {
    /// Create an engine with the default recency policies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: EngineState::Uninitialized,
                store: AssertionStore::new(),
            }),
            trust: TrustEvaluator::new(),
            resolver: BindingResolver::new(),
        }
    }
}

impl<T: TrustPolicy, B: BindingAuthorityPolicy> LogicEngine<T, B> {
    /// Create an engine with custom derivation policies.
    #[must_use]
    pub fn with_policies(trust_policy: T, binding_policy: B) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: EngineState::Uninitialized,
                store: AssertionStore::new(),
            }),
            trust: TrustEvaluator::with_policy(trust_policy),
            resolver: BindingResolver::with_policy(binding_policy),
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Initialize the engine. Idempotent; a no-op when already `Ready` or
    /// `Disabled`.
    pub fn start(&self) -> Result<(), EngineError> {
        let mut inner = self.inner.write();
        match inner.state {
            EngineState::Uninitialized => {
                inner.state = EngineState::Ready;
                Ok(())
            }
            EngineState::Ready | EngineState::Disabled => Ok(()),
            EngineState::ShutDown => Err(EngineError::ShutDown),
        }
    }

    /// Release engine resources. Idempotent and terminal.
    pub fn shutdown(&self) {
        let mut inner = self.inner.write();
        inner.state = EngineState::ShutDown;
        inner.store.clear();
    }

    /// Disable the logic layer. Every subsequent query answers a cheap
    /// deterministic negative; asserts are accepted and dropped. A no-op
    /// once shut down.
    pub fn disable(&self) {
        let mut inner = self.inner.write();
        if inner.state != EngineState::ShutDown {
            inner.state = EngineState::Disabled;
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.inner.read().state
    }

    // =========================================================================
    // ASSERTION
    // =========================================================================

    /// Record a claim that `system` is vouched-for as of `time`.
    ///
    /// An `Err` means the engine cannot track trust facts; the caller
    /// decides whether that is process-ending.
    pub fn record_trust(&self, system: SystemId, time: Timestamp) -> Result<(), EngineError> {
        validate_field("system", system.as_str(), MAX_SYSTEM_LENGTH)?;

        let mut inner = self.inner.write();
        match inner.state {
            EngineState::ShutDown => Err(EngineError::ShutDown),
            // Dropped, not recorded: the disabled layer tracks nothing
            EngineState::Disabled => Ok(()),
            EngineState::Uninitialized | EngineState::Ready => {
                inner.state = EngineState::Ready;
                inner.store.assert_trust(system, time);
                Ok(())
            }
        }
    }

    /// Record a claim by `system` that `media` ⇄ `network` held at `time`.
    pub fn record_binding(
        &self,
        system: SystemId,
        media: MediaAddr,
        network: NetAddr,
        time: Timestamp,
    ) -> Result<(), EngineError> {
        validate_field("system", system.as_str(), MAX_SYSTEM_LENGTH)?;
        validate_field("media address", media.as_str(), MAX_MEDIA_ADDR_LENGTH)?;
        validate_field("network address", network.as_str(), MAX_NETWORK_ADDR_LENGTH)?;

        let mut inner = self.inner.write();
        match inner.state {
            EngineState::ShutDown => Err(EngineError::ShutDown),
            EngineState::Disabled => Ok(()),
            EngineState::Uninitialized | EngineState::Ready => {
                inner.state = EngineState::Ready;
                inner.store.assert_binding(system, media, network, time);
                Ok(())
            }
        }
    }

    // =========================================================================
    // DERIVED QUERIES
    // =========================================================================

    /// Determine whether `system` is trusted at `time`.
    ///
    /// Fail-closed: false while disabled or shut down, regardless of
    /// store contents.
    #[must_use]
    pub fn is_trusted(&self, system: &SystemId, time: Timestamp) -> bool {
        {
            let inner = self.inner.read();
            match inner.state {
                EngineState::Disabled | EngineState::ShutDown => return false,
                EngineState::Ready => return self.trust.is_trusted(&inner.store, system, time),
                EngineState::Uninitialized => {}
            }
        }
        // Lazy init path: upgrade to the write lock and re-check, since
        // disable/shutdown may have won the race in between
        let mut inner = self.inner.write();
        if inner.state == EngineState::Uninitialized {
            inner.state = EngineState::Ready;
        }
        if inner.state != EngineState::Ready {
            return false;
        }
        self.trust.is_trusted(&inner.store, system, time)
    }

    /// Find the valid media address bound to `network` at `time`.
    #[must_use]
    pub fn resolve_media_for_network(
        &self,
        network: &NetAddr,
        time: Timestamp,
    ) -> Option<MediaAddr> {
        {
            let inner = self.inner.read();
            match inner.state {
                EngineState::Disabled | EngineState::ShutDown => return None,
                EngineState::Ready => {
                    return self
                        .resolver
                        .find_media_for_network(&inner.store, network, time);
                }
                EngineState::Uninitialized => {}
            }
        }
        let mut inner = self.inner.write();
        if inner.state == EngineState::Uninitialized {
            inner.state = EngineState::Ready;
        }
        if inner.state != EngineState::Ready {
            return None;
        }
        self.resolver
            .find_media_for_network(&inner.store, network, time)
    }

    /// Find the valid network address bound to `media` at `time`.
    #[must_use]
    pub fn resolve_network_for_media(&self, media: &MediaAddr, time: Timestamp) -> Option<NetAddr> {
        {
            let inner = self.inner.read();
            match inner.state {
                EngineState::Disabled | EngineState::ShutDown => return None,
                EngineState::Ready => {
                    return self
                        .resolver
                        .find_network_for_media(&inner.store, media, time);
                }
                EngineState::Uninitialized => {}
            }
        }
        let mut inner = self.inner.write();
        if inner.state == EngineState::Uninitialized {
            inner.state = EngineState::Ready;
        }
        if inner.state != EngineState::Ready {
            return None;
        }
        self.resolver
            .find_network_for_media(&inner.store, media, time)
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    /// Number of recorded trust statements.
    #[must_use]
    pub fn trust_count(&self) -> usize {
        self.inner.read().store.trust_count()
    }

    /// Number of recorded binding statements.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.inner.read().store.binding_count()
    }
}

/// Reject empty or overlong statement fields.
fn validate_field(name: &str, value: &str, max_len: usize) -> Result<(), EngineError> {
    if value.is_empty() {
        return Err(EngineError::InvalidStatement(format!("{name} is empty")));
    }
    if value.len() > max_len {
        return Err(EngineError::InvalidStatement(format!(
            "{name} exceeds {max_len} bytes"
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let engine = LogicEngine::new();
        assert_eq!(engine.state(), EngineState::Uninitialized);
        engine.start().expect("start");
        assert_eq!(engine.state(), EngineState::Ready);
        engine.start().expect("second start is a no-op");
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn first_use_initializes_lazily() {
        let engine = LogicEngine::new();
        engine
            .record_trust(SystemId::new("sysA"), Timestamp::new(1))
            .expect("record");
        assert_eq!(engine.state(), EngineState::Ready);

        let engine = LogicEngine::new();
        assert!(!engine.is_trusted(&SystemId::new("sysA"), Timestamp::new(1)));
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn disable_is_monotone_and_fail_closed() {
        let engine = LogicEngine::new();
        engine
            .record_trust(SystemId::new("sysA"), Timestamp::new(1))
            .expect("record");
        assert!(engine.is_trusted(&SystemId::new("sysA"), Timestamp::new(1)));

        engine.disable();
        assert!(!engine.is_trusted(&SystemId::new("sysA"), Timestamp::new(1)));
        // start() does not re-enable
        engine.start().expect("start while disabled");
        assert_eq!(engine.state(), EngineState::Disabled);
    }

    #[test]
    fn disabled_asserts_are_dropped() {
        let engine = LogicEngine::new();
        engine.disable();
        engine
            .record_trust(SystemId::new("sysA"), Timestamp::new(1))
            .expect("accepted but dropped");
        assert_eq!(engine.trust_count(), 0);
    }

    #[test]
    fn shutdown_is_terminal() {
        let engine = LogicEngine::new();
        engine
            .record_binding(
                SystemId::new("sysA"),
                MediaAddr::new("AA:BB"),
                NetAddr::new("10.0.0.1"),
                Timestamp::new(5),
            )
            .expect("record");

        engine.shutdown();
        engine.shutdown(); // idempotent
        assert_eq!(engine.state(), EngineState::ShutDown);
        assert_eq!(engine.binding_count(), 0);

        assert!(matches!(engine.start(), Err(EngineError::ShutDown)));
        assert!(matches!(
            engine.record_trust(SystemId::new("sysA"), Timestamp::new(6)),
            Err(EngineError::ShutDown)
        ));
        assert!(!engine.is_trusted(&SystemId::new("sysA"), Timestamp::new(6)));
        assert_eq!(
            engine.resolve_media_for_network(&NetAddr::new("10.0.0.1"), Timestamp::new(6)),
            None
        );
    }

    #[test]
    fn overlong_fields_are_rejected_not_truncated() {
        let engine = LogicEngine::new();
        let long_system = "s".repeat(MAX_SYSTEM_LENGTH + 1);
        assert!(matches!(
            engine.record_trust(SystemId::new(long_system), Timestamp::new(1)),
            Err(EngineError::InvalidStatement(_))
        ));

        let long_media = "f".repeat(MAX_MEDIA_ADDR_LENGTH + 1);
        assert!(matches!(
            engine.record_binding(
                SystemId::new("sysA"),
                MediaAddr::new(long_media),
                NetAddr::new("10.0.0.1"),
                Timestamp::new(1),
            ),
            Err(EngineError::InvalidStatement(_))
        ));
        assert_eq!(engine.binding_count(), 0);
    }

    #[test]
    fn empty_fields_are_rejected() {
        let engine = LogicEngine::new();
        assert!(matches!(
            engine.record_trust(SystemId::new(""), Timestamp::new(1)),
            Err(EngineError::InvalidStatement(_))
        ));
    }

    #[test]
    fn facade_round_trip() {
        let engine = LogicEngine::new();
        engine.start().expect("start");

        let sys = SystemId::new("sysA");
        engine
            .record_trust(sys.clone(), Timestamp::new(10))
            .expect("record");
        assert!(engine.is_trusted(&sys, Timestamp::new(10)));
        assert!(!engine.is_trusted(&sys, Timestamp::new(9)));

        engine
            .record_binding(
                sys.clone(),
                MediaAddr::new("AA:BB"),
                NetAddr::new("10.0.0.1"),
                Timestamp::new(5),
            )
            .expect("record");
        engine
            .record_binding(
                sys,
                MediaAddr::new("CC:DD"),
                NetAddr::new("10.0.0.1"),
                Timestamp::new(8),
            )
            .expect("record");

        let net = NetAddr::new("10.0.0.1");
        assert_eq!(
            engine.resolve_media_for_network(&net, Timestamp::new(8)),
            Some(MediaAddr::new("CC:DD"))
        );
        assert_eq!(
            engine.resolve_media_for_network(&net, Timestamp::new(6)),
            Some(MediaAddr::new("AA:BB"))
        );
        assert_eq!(
            engine.resolve_network_for_media(&MediaAddr::new("CC:DD"), Timestamp::new(8)),
            Some(net)
        );
    }

    #[test]
    fn concurrent_readers_and_writer() {
        use std::sync::Arc;

        let engine = Arc::new(LogicEngine::new());
        engine.start().expect("start");

        let writer = {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                for i in 0..200u64 {
                    engine
                        .record_binding(
                            SystemId::new("sysA"),
                            MediaAddr::new(format!("02:00:00:00:00:{:02x}", i % 256)),
                            NetAddr::new("10.0.0.1"),
                            Timestamp::new(i),
                        )
                        .expect("record");
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        // Answers vary with interleaving but must never panic
                        // or observe a torn store
                        let net = NetAddr::new("10.0.0.1");
                        let _ = engine.resolve_media_for_network(&net, Timestamp::new(u64::MAX));
                    }
                })
            })
            .collect();

        writer.join().expect("writer");
        for reader in readers {
            reader.join().expect("reader");
        }
        assert_eq!(engine.binding_count(), 200);
    }
}
