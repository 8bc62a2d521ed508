//! # Trace Format
//!
//! JSON trace records for the `replay` command: a flat list of assertion
//! and query operations applied in order against a fresh engine, plus the
//! answers the queries produced.

use arpsentry_core::{EngineError, LogicEngine, MediaAddr, NetAddr, SystemId, Timestamp};
use serde::{Deserialize, Serialize};

/// One operation in a replay trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TraceRecord {
    /// Record a trust statement.
    Trust { system: String, time: u64 },
    /// Record a binding statement.
    Binding {
        system: String,
        media: String,
        network: String,
        time: u64,
    },
    /// Ask whether a system is trusted.
    IsTrusted { system: String, time: u64 },
    /// Look up the valid media address for a network address.
    FindMedia { network: String, time: u64 },
    /// Look up the valid network address for a media address.
    FindNetwork { media: String, time: u64 },
}

/// Answer produced by a query record during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TraceAnswer {
    Trusted {
        system: String,
        time: u64,
        trusted: bool,
    },
    Media {
        network: String,
        time: u64,
        media: Option<String>,
    },
    Network {
        media: String,
        time: u64,
        network: Option<String>,
    },
}

/// Apply trace records in order and collect the query answers.
///
/// Assertion failures propagate: a trace that cannot be recorded is a
/// fatal replay error, matching the daemon's fail-stop contract.
pub fn apply(engine: &LogicEngine, records: &[TraceRecord]) -> Result<Vec<TraceAnswer>, EngineError> {
    let mut answers = Vec::new();

    for record in records {
        match record {
            TraceRecord::Trust { system, time } => {
                engine.record_trust(SystemId::new(system), Timestamp::new(*time))?;
            }
            TraceRecord::Binding {
                system,
                media,
                network,
                time,
            } => {
                engine.record_binding(
                    SystemId::new(system),
                    MediaAddr::new(media),
                    NetAddr::new(network),
                    Timestamp::new(*time),
                )?;
            }
            TraceRecord::IsTrusted { system, time } => {
                let trusted =
                    engine.is_trusted(&SystemId::new(system), Timestamp::new(*time));
                answers.push(TraceAnswer::Trusted {
                    system: system.clone(),
                    time: *time,
                    trusted,
                });
            }
            TraceRecord::FindMedia { network, time } => {
                let media = engine
                    .resolve_media_for_network(&NetAddr::new(network), Timestamp::new(*time));
                answers.push(TraceAnswer::Media {
                    network: network.clone(),
                    time: *time,
                    media: media.map(|m| m.as_str().to_string()),
                });
            }
            TraceRecord::FindNetwork { media, time } => {
                let network = engine
                    .resolve_network_for_media(&MediaAddr::new(media), Timestamp::new(*time));
                answers.push(TraceAnswer::Network {
                    media: media.clone(),
                    time: *time,
                    network: network.map(|n| n.as_str().to_string()),
                });
            }
        }
    }

    Ok(answers)
}

// =============================================================================
// TESTS
// =============================================================================
