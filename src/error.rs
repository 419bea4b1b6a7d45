//! Error types.
//!
//! Two families, handled very differently:
//! - [`FetchError`] is transient. The data service recovers from it by
//!   serving the last cached value, so it never reaches a consumer.
//! - [`ConfigError`] is a programming/integration error and fails loudly,
//!   either at startup or at the boundary where a source is selected by name.

use reqwest::StatusCode;
use thiserror::Error;

use crate::source::SourceKey;

/// A provider call that did not produce a usable value.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("provider returned {0}")]
    Status(StatusCode),

    /// Request deadline exceeded.
    #[error("request timed out after {0}ms")]
    Timeout(u128),

    /// Payload was missing a field or had the wrong shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::Malformed(what.into())
    }
}

/// Configuration and integration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },

    #[error("unknown source: {0:?}")]
    UnknownSource(String),

    #[error("source {0} is disabled")]
    SourceDisabled(SourceKey),
}

impl ConfigError {
    pub fn invalid(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Invalid {
            var: var.into(),
            value: value.into(),
        }
    }
}
