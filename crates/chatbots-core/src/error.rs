//! Error types for the chatbots core.
//!
//! Dispatch itself has no error type of its own: "no handler matched" is
//! `Ok(None)`, and a failing handler's [`BoxError`] is handed back to the
//! caller untouched.

use thiserror::Error;

/// Type-erased error returned by handlers.
pub use tower::BoxError;

/// Errors that can occur while decoding an inbound platform payload.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload was not valid JSON for the expected type.
    #[error("failed to decode {kind} payload: {source}")]
    Json {
        /// The payload kind being decoded (e.g. "telegram update").
        kind: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    /// Creates a JSON decode error for the given payload kind.
    pub fn json(kind: &'static str, source: serde_json::Error) -> Self {
        Self::Json { kind, source }
    }
}

/// Result type for payload decoding.
pub type ParseResult<T> = Result<T, ParseError>;
