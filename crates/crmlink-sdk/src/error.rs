//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. Callers are not expected to branch on the variant:
//! transport failures, non-success statuses and malformed bodies all mean
//! "the request failed".

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing input (e.g. no identity to connect with).
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failure: transport, error status or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
