//! # wordgroup CLI Module
//!
//! This module implements the CLI interface for wordgroup.
//!
//! ## Available Commands
//!
//! - `rhymes` - Show rhymes grouped by syllable count
//! - `similar` - Show words with a similar meaning
//! - `group` - Group a JSON array of records by a field
//! - `session` - Interactive lookup session (default)
//! - `server` - Start the HTTP server

mod commands;

use crate::{AppError, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wordgroup_core::Relation;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// wordgroup - rhymes and similar words, grouped
///
/// Looks words up in the Datamuse API and groups the results;
/// also groups any JSON array of records by a field.
#[derive(Parser, Debug)]
#[command(name = "wordgroup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show words that rhyme with WORD, grouped by syllable count
    Rhymes {
        /// Word to rhyme with
        word: String,
    },

    /// Show words with a meaning similar to WORD
    Similar {
        /// Word to find similar words for
        word: String,
    },

    /// Group a JSON array of records by a field
    Group {
        /// Path to the input file (JSON array of objects)
        #[arg(short, long)]
        file: PathBuf,

        /// Field name to group by
        #[arg(short, long)]
        by: String,
    },

    /// Start an interactive lookup session
    Session,

    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let config = Config::load(cli.config.as_deref())?.with_env_overrides()?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Rhymes { word }) => {
            cmd_lookup(&config, Relation::Rhymes, &word, json_mode).await
        }
        Some(Commands::Similar { word }) => {
            cmd_lookup(&config, Relation::MeansLike, &word, json_mode).await
        }
        Some(Commands::Group { file, by }) => cmd_group(&file, &by, json_mode),
        Some(Commands::Server { host, port }) => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            cmd_server(&config, &host, port).await
        }
        Some(Commands::Session) | None => cmd_session(&config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_group_command() {
        let cli = Cli::try_parse_from([
            "wordgroup",
            "--json-mode",
            "group",
            "-f",
            "x.json",
            "-b",
            "team",
        ])
        .expect("parse");
        assert!(cli.json_mode);
        assert!(matches!(
            cli.command,
            Some(Commands::Group { ref by, .. }) if by == "team"
        ));
    }

    #[test]
    fn no_subcommand_means_session() {
        let cli = Cli::try_parse_from(["wordgroup"]).expect("parse");
        assert!(cli.command.is_none());
    }
}
