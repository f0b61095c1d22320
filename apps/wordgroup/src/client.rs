//! # Datamuse HTTP Client
//!
//! Wrapper around the Datamuse `/words` endpoint.
//!
//! Failures are reported once and returned; nothing is retried or cached.

use crate::config::ApiConfig;
use std::future::Future;
use std::time::Duration;
use wordgroup_core::{Relation, WordEntry};

/// Errors from the HTTP client layer.
#[derive(Debug)]
pub enum ClientError {
    /// The query word is empty.
    InvalidWord,
    /// The HTTP client could not be constructed.
    Setup(String),
    /// Cannot reach the word API.
    ConnectionFailed(String),
    /// The request did not finish within the configured timeout.
    Timeout(String),
    /// 429 Too Many Requests.
    RateLimited,
    /// Any other non-success status.
    Status(u16, String),
    /// Failed to parse response body.
    ParseError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWord => write!(f, "Invalid word: the query word is empty"),
            Self::Setup(msg) => write!(f, "Cannot create HTTP client: {msg}"),
            Self::ConnectionFailed(url) => write!(f, "Cannot connect to word API at {url}"),
            Self::Timeout(url) => write!(f, "Request to {url} timed out"),
            Self::RateLimited => write!(f, "Rate limited: too many requests"),
            Self::Status(status, msg) => write!(f, "Word API error ({status}): {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

// =============================================================================
// WORD SOURCE
// =============================================================================

/// Anything that can look up related words.
///
/// The session is generic over this so it can run against a canned source.
pub trait WordSource {
    fn lookup(
        &self,
        relation: Relation,
        word: &str,
    ) -> impl Future<Output = Result<Vec<WordEntry>, ClientError>> + Send;
}

// =============================================================================
// DATAMUSE CLIENT
// =============================================================================

/// HTTP client for the Datamuse word API.
#[derive(Debug, Clone)]
pub struct DatamuseClient {
    http: reqwest::Client,
    base_url: String,
    max_results: u32,
}

impl DatamuseClient {
    /// Create a client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /words?{rel_rhy|ml}={word}&max={max_results}
    pub async fn fetch(
        &self,
        relation: Relation,
        word: &str,
    ) -> Result<Vec<WordEntry>, ClientError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ClientError::InvalidWord);
        }

        let url = format!("{}/words", self.base_url);
        let max = self.max_results.to_string();
        let req = self
            .http
            .get(&url)
            .query(&[(relation.query_param(), word), ("max", max.as_str())]);

        tracing::debug!(%relation, word, "Querying word API");
        let resp = self.send(req).await?;
        let entries = self.handle_response(resp).await?;
        tracing::debug!(%relation, word, results = entries.len(), "Word API answered");
        Ok(entries)
    }

    /// Send a request and classify transport errors.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        req.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.base_url.clone())
            } else {
                ClientError::ConnectionFailed(format!("{}: {e}", self.base_url))
            }
        })
    }

    /// Check the status code and decode the word list.
    async fn handle_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<WordEntry>, ClientError> {
        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), body));
        }
        resp.json::<Vec<WordEntry>>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }
}

impl WordSource for DatamuseClient {
    fn lookup(
        &self,
        relation: Relation,
        word: &str,
    ) -> impl Future<Output = Result<Vec<WordEntry>, ClientError>> + Send {
        self.fetch(relation, word)
    }
}
