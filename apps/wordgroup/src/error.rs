//! # Application Errors

use crate::client::ClientError;
use thiserror::Error;
use wordgroup_core::GroupError;

/// Errors surfaced by the CLI, session and server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Grouping or model validation failed.
    #[error(transparent)]
    Group(#[from] GroupError),

    /// The word API could not be queried.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The configuration file is missing, malformed or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
