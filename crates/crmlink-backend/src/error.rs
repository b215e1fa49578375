//! Error types for the integration backend.
//!
//! [`BackendError`] unifies all failure modes and implements
//! [`axum::response::IntoResponse`] so handlers can return
//! `Result<…, BackendError>` directly.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors that can occur while serving integration requests.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The provider redirected back with an `error` parameter.
    #[error("{0}")]
    AuthorizationDenied(String),

    /// The callback carried no authorization code.
    #[error("No code provided")]
    MissingCode,

    /// The callback `state` did not identify a user and organisation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The provider refused to exchange the code for a token.
    #[error("Failed to get access token")]
    TokenExchangeFailed(String),

    /// The credentials blob sent to `get_items` is unusable.
    #[error("Invalid credentials")]
    InvalidCredentials(String),

    /// Provider endpoint URLs are misconfigured.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP call to the provider failed at the transport level.
    #[error("failed to reach provider: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::AuthorizationDenied(_)
            | Self::MissingCode
            | Self::InvalidState(_)
            | Self::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            Self::TokenExchangeFailed(_) | Self::HttpError(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();

        match &self {
            Self::TokenExchangeFailed(detail) | Self::InvalidCredentials(detail) => {
                tracing::error!(%status, error = %message, %detail, "request failed");
            }
            _ => tracing::error!(%status, error = %message, "request failed"),
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_bad_request() {
        for err in [
            BackendError::MissingCode,
            BackendError::AuthorizationDenied("access_denied".into()),
            BackendError::InvalidState("x".into()),
            BackendError::InvalidCredentials("missing access_token".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn provider_failures_are_bad_gateway() {
        let err = BackendError::TokenExchangeFailed("401".into());
        assert_eq!(err.to_string(), "Failed to get access token");
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn detail_is_not_exposed() {
        let err = BackendError::InvalidCredentials("expected value at line 1".into());
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
