//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::trace::{self, TraceAnswer, TraceRecord};
use arpsentry_core::{EngineError, LogicEngine, MediaAddr, NetAddr, SystemId, Timestamp};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for trace replay (10 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_TRACE_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), EngineError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| EngineError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(EngineError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Engine status snapshot for the `status` command.
#[derive(Debug, Serialize)]
struct StatusReport {
    state: &'static str,
    trust_statements: usize,
    binding_statements: usize,
}

/// Show engine state and fact counts.
pub fn cmd_status(engine: &LogicEngine, json_mode: bool) -> Result<(), EngineError> {
    let report = StatusReport {
        state: engine.state().as_str(),
        trust_statements: engine.trust_count(),
        binding_statements: engine.binding_count(),
    };

    if json_mode {
        let json = serde_json::to_string(&report)
            .map_err(|e| EngineError::SerializationError(e.to_string()))?;
        println!("{}", json);
    } else {
        println!("Engine state:       {}", report.state);
        println!("Trust statements:   {}", report.trust_statements);
        println!("Binding statements: {}", report.binding_statements);
    }
    Ok(())
}

// =============================================================================
// SELFTEST COMMAND
// =============================================================================

/// Validate the logic interface with synthetic data.
///
/// Deterministic counterpart of the original daemon's randomized unit
/// test: record a trust and a binding claim, then check that the derived
/// answers match the recency policy.
pub fn cmd_selftest(engine: &LogicEngine, json_mode: bool) -> Result<(), EngineError> {
    tracing::info!("Unit testing the arpsentry logic with synthetic data");

    let sys = SystemId::new("sys042");
    let media = MediaAddr::new("02:00:00:00:00:2a");
    let net = NetAddr::new("10.0.0.42");
    let t = Timestamp::new(42);

    engine.record_trust(sys.clone(), t)?;
    engine.record_binding(sys.clone(), media.clone(), net.clone(), t)?;

    let trusted = engine.is_trusted(&sys, t);
    let found_media = engine.resolve_media_for_network(&net, t.succ());
    let found_net = engine.resolve_network_for_media(&media, t.succ());

    let disabled = engine.state() == arpsentry_core::EngineState::Disabled;
    let passed = disabled
        || (trusted && found_media == Some(media.clone()) && found_net == Some(net.clone()));

    if json_mode {
        let json = serde_json::to_string(&serde_json::json!({
            "passed": passed,
            "disabled": disabled,
            "trusted": trusted,
            "media": found_media.map(|m| m.as_str().to_string()),
            "network": found_net.map(|n| n.as_str().to_string()),
        }))
        .map_err(|e| EngineError::SerializationError(e.to_string()))?;
        println!("{}", json);
    } else if disabled {
        println!("Selftest: logic layer disabled, calls exercised only");
    } else {
        println!("Selftest: {}", if passed { "passed" } else { "FAILED" });
    }

    if passed {
        tracing::info!("Unit testing complete");
        Ok(())
    } else {
        Err(EngineError::Unavailable(
            "selftest answers did not match the recency policy".to_string(),
        ))
    }
}

// =============================================================================
// SIMULATE COMMAND
// =============================================================================

/// Run the simulated control loop.
///
/// Feeds synthetic trust/binding claims through the engine on a fixed
/// interval and answers lookups for them, the way the real control loop
/// would for observed traffic. Stops after `events` events or on ctrl-c.
pub async fn cmd_simulate(
    engine: &LogicEngine,
    events: u64,
    hosts: u64,
    interval_ms: u64,
) -> Result<(), EngineError> {
    let hosts = hosts.max(1);
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    let mut recorded = 0u64;

    tracing::info!(events, hosts, interval_ms, "simulated control loop starting");

    for i in 0..events {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted - shutting down");
                break;
            }
        }

        let host = SystemId::new(format!("host{:03}", i % hosts));
        let media = MediaAddr::new(format!("02:00:00:00:00:{:02x}", i % hosts));
        let net = NetAddr::new(format!("10.0.0.{}", (i % hosts) + 1));
        let now = Timestamp::new(i + 1);

        engine.record_trust(host.clone(), now)?;
        engine.record_binding(host.clone(), media.clone(), net.clone(), now)?;
        recorded += 1;

        let trusted = engine.is_trusted(&host, now);
        let bound = engine.resolve_media_for_network(&net, now);
        tracing::info!(
            host = host.as_str(),
            network = net.as_str(),
            trusted,
            media = bound.as_ref().map(|m| m.as_str()),
            "lookup"
        );
    }

    engine.shutdown();
    tracing::info!(
        recorded,
        "simulated control loop finished - engine shut down"
    );
    Ok(())
}

// =============================================================================
// REPLAY COMMAND
// =============================================================================

/// Apply a JSON trace of assertions and queries, printing the answers.
pub fn cmd_replay(engine: &LogicEngine, file: &Path, json_mode: bool) -> Result<(), EngineError> {
    validate_file_size(file, MAX_TRACE_FILE_SIZE)?;

    let contents = std::fs::read_to_string(file)
        .map_err(|e| EngineError::IoError(format!("Cannot read trace file: {}", e)))?;
    let records: Vec<TraceRecord> = serde_json::from_str(&contents)
        .map_err(|e| EngineError::SerializationError(format!("Invalid trace: {}", e)))?;

    let answers = trace::apply(engine, &records)?;

    if json_mode {
        let json = serde_json::to_string(&answers)
            .map_err(|e| EngineError::SerializationError(e.to_string()))?;
        println!("{}", json);
    } else {
        for answer in &answers {
            match answer {
                TraceAnswer::Trusted {
                    system,
                    time,
                    trusted,
                } => println!("trusted({}, {}) -> {}", system, time, trusted),
                TraceAnswer::Media {
                    network,
                    time,
                    media,
                } => println!(
                    "valid_binding({}, X, {}) -> {}",
                    network,
                    time,
                    media.as_deref().unwrap_or("none")
                ),
                TraceAnswer::Network {
                    media,
                    time,
                    network,
                } => println!(
                    "valid_binding(X, {}, {}) -> {}",
                    media,
                    time,
                    network.as_deref().unwrap_or("none")
                ),
            }
        }
    }

    tracing::info!(
        records = records.len(),
        answers = answers.len(),
        "trace replay complete"
    );
    Ok(())
}
