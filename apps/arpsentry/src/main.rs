//! # arpsentry - Fail-Closed ARP Trust Daemon
//!
//! The main binary for the arpsentry trust-decision engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/arpsentry (THE BINARY)           │
//! │                                                      │
//! │  ┌──────────┐   ┌────────────┐   ┌───────────────┐  │
//! │  │   CLI    │   │  simulate  │   │  trace replay │  │
//! │  │  (clap)  │   │  (tokio)   │   │  (serde_json) │  │
//! │  └────┬─────┘   └─────┬──────┘   └──────┬────────┘  │
//! │       └───────────────┼─────────────────┘           │
//! │                       ▼                             │
//! │              ┌─────────────────┐                    │
//! │              │ arpsentry-core  │                    │
//! │              │   (THE LOGIC)   │                    │
//! │              └─────────────────┘                    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Exercise the logic interface
//! arpsentry selftest
//!
//! # Run the simulated control loop
//! arpsentry simulate --events 64 --hosts 8
//!
//! # Replay a recorded trace
//! arpsentry replay -f trace.json --json-mode
//! ```

use arpsentry::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing; ARPSENTRY_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ARPSENTRY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "arpsentry=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command; engine errors are fatal here, by the daemon's
    // fail-stop contract (a daemon that cannot track trust must not
    // continue as if nothing were tracked)
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the arpsentry startup banner.
fn print_banner() {
    println!(
        r"
  arpsentry v{}

  Append-only • Recency-resolved • Fail-closed
",
        env!("CARGO_PKG_VERSION")
    );
}
