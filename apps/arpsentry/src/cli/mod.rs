//! # arpsentry CLI Module
//!
//! This module implements the CLI interface for the arpsentry daemon.
//!
//! ## Available Commands
//!
//! - `selftest` - Exercise the full logic facade with synthetic data
//! - `simulate` - Run the simulated control loop (synthetic traffic)
//! - `replay` - Apply a JSON trace of assertions/queries and print answers
//! - `status` - Show engine state and fact counts

mod commands;

use arpsentry_core::EngineError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// arpsentry - fail-closed ARP trust bookkeeping
///
/// Records timestamped trust and binding assertions and answers the two
/// questions the defense loop needs: "is this system trusted?" and "what
/// is the valid address binding?".
#[derive(Parser, Debug)]
#[command(name = "arpsentry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Disable the logic layer: every query answers fail-closed
    /// (only for dev performance debugging)
    #[arg(short = 'n', long, global = true)]
    pub disable_logic: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the logic interface with synthetic data
    Selftest,

    /// Run the simulated control loop with synthetic claims and lookups
    Simulate {
        /// Number of synthetic events to feed through the engine
        #[arg(short, long, default_value = "32")]
        events: u64,

        /// Number of distinct simulated hosts
        #[arg(long, default_value = "4")]
        hosts: u64,

        /// Milliseconds between events
        #[arg(long, default_value = "50")]
        interval_ms: u64,
    },

    /// Replay a JSON trace of assertions and queries
    Replay {
        /// Path to the trace file (JSON array of records)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show engine state and fact counts
    Status,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), EngineError> {
    let engine = arpsentry_core::LogicEngine::new();

    if cli.disable_logic {
        tracing::warn!("Logic layer is disabled - all queries answer fail-closed");
        engine.disable();
    }

    match cli.command {
        Some(Commands::Selftest) => cmd_selftest(&engine, cli.json_mode),
        Some(Commands::Simulate {
            events,
            hosts,
            interval_ms,
        }) => cmd_simulate(&engine, events, hosts, interval_ms).await,
        Some(Commands::Replay { file }) => cmd_replay(&engine, &file, cli.json_mode),
        Some(Commands::Status) | None => cmd_status(&engine, cli.json_mode),
    }
}
