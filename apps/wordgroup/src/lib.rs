//! # wordgroup
//!
//! Application layer over `wordgroup-core`: the Datamuse client, terminal
//! rendering, the interactive session, the CLI and the JSON HTTP service.
//!
//! The binary in `main.rs` only sets up logging and dispatches to [`cli`].

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use client::{ClientError, DatamuseClient, WordSource};
pub use config::{ApiConfig, Config, ServerConfig};
pub use error::AppError;
pub use render::TextSink;
pub use session::{Command, Flow, SessionState};
