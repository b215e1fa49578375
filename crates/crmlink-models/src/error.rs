//! Error types for the `crmlink-models` crate.
//!
//! All fallible constructors and parsers in this crate return variants of
//! [`ModelError`].

/// Errors produced when interpreting model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A credentials blob could not be decoded as a token document.
    #[error("malformed credentials: {reason}")]
    MalformedCredentials {
        /// Human-readable explanation.
        reason: String,
    },

    /// A required field was missing from a document.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// An OAuth `state` value was not of the form `{user_id}:{org_id}`.
    #[error("invalid OAuth state \"{value}\"")]
    InvalidState {
        /// The value that failed to parse.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_malformed_credentials() {
        let err = ModelError::MalformedCredentials {
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed credentials: expected value at line 1 column 1"
        );
    }

    #[test]
    fn error_display_missing_field() {
        let err = ModelError::MissingField {
            field: "access_token".into(),
        };
        assert_eq!(err.to_string(), "missing required field: access_token");
    }

    #[test]
    fn error_display_invalid_state() {
        let err = ModelError::InvalidState {
            value: "nocolon".into(),
        };
        assert_eq!(err.to_string(), "invalid OAuth state \"nocolon\"");
    }
}
