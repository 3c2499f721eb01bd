//! Error handling for the Companies House client
//!
//! Every fetch operation surfaces its failure to the caller unchanged.
//! There are no retries and no partial results.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, CompaniesHouseError>;

/// Main error type for the Companies House client
#[derive(Error, Debug)]
pub enum CompaniesHouseError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Companies House API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response from {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filing {transaction_id} has no document available")]
    NoDocument { transaction_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompaniesHouseError {
    pub fn request(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Request {
            url: url.into(),
            message: err.to_string(),
        }
    }

    pub fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Build a status error, keeping at most 200 characters of the body
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(200).collect(),
        }
    }

    /// True for a 404 from the upstream API
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
