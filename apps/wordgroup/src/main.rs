//! # wordgroup
//!
//! Looks words up in the Datamuse API and groups what comes back.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive session (default)
//! wordgroup
//!
//! # One-shot lookups
//! wordgroup rhymes grape
//! wordgroup similar happy --json-mode
//!
//! # Group any JSON array of records by a field
//! wordgroup group -f people.json -b team
//!
//! # Start the HTTP server
//! wordgroup server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordgroup::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // WORDGROUP_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr so stdout stays clean for pages and --json-mode.
    let log_format = std::env::var("WORDGROUP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wordgroup=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
