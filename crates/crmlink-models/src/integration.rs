//! Credentials, integration parameters and the wire responses exchanged
//! with the integration backend.
//!
//! The backend answers every adapter request with a small JSON object whose
//! only contract is the presence of one field:
//!
//! | Endpoint | Response type | Success signal |
//! |----------|---------------|----------------|
//! | `authorize` | [`AuthorizeResponse`] | `auth_url` present |
//! | `credentials` | [`CredentialsResponse`] | `credentials` present |
//! | `get_items` | [`ItemsResponse`](crate::ItemsResponse) | body itself |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::provider::ProviderId;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Opaque, server-issued credentials blob.
///
/// The adapter never looks inside; only the backend decodes it (see
/// [`access_token`](Self::access_token)). `Debug` output is redacted so the
/// blob never ends up in logs.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Credentials(String);

impl Credentials {
    /// Wrap a raw credentials blob.
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    /// Return the raw blob.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank blob does not count as credentials.
    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }

    /// Decode the blob as a stored OAuth token document and return its
    /// `access_token`.
    ///
    /// ```
    /// use crmlink_models::Credentials;
    ///
    /// let creds = Credentials::new(r#"{"access_token":"abc","expires_in":1800}"#);
    /// assert_eq!(creds.access_token().unwrap(), "abc");
    /// ```
    pub fn access_token(&self) -> Result<String, ModelError> {
        let token: TokenSet =
            serde_json::from_str(&self.0).map_err(|e| ModelError::MalformedCredentials {
                reason: e.to_string(),
            })?;
        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ModelError::MissingField {
                field: "access_token".into(),
            })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials(<{} bytes>)", self.0.len())
    }
}

/// Token document returned by a provider's OAuth token endpoint.
///
/// Stored verbatim by the backend; only `access_token` is required.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSet {
    /// Bearer token for the provider API.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Refresh token, when the provider issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token type (usually `"bearer"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

// ---------------------------------------------------------------------------
// IntegrationParams
// ---------------------------------------------------------------------------

/// Integration parameters owned by the parent view.
///
/// On the wire this is the loosely-typed mapping the parent stores:
/// `{}` when disconnected, `{"type": "<provider>", "credentials": <blob>}`
/// when connected.
///
/// ```
/// use crmlink_models::{Credentials, IntegrationParams, ProviderId};
///
/// let params = IntegrationParams::connected(ProviderId::new("hubspot"), Credentials::new("tok"));
/// assert_eq!(
///     serde_json::to_string(&params).unwrap(),
///     r#"{"type":"hubspot","credentials":"tok"}"#,
/// );
/// assert_eq!(serde_json::to_string(&IntegrationParams::Disconnected).unwrap(), "{}");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "RawIntegrationParams", into = "RawIntegrationParams")]
pub enum IntegrationParams {
    /// No account connected (`{}`).
    #[default]
    Disconnected,
    /// An account is connected.
    Connected {
        /// Integration type (`"hubspot"`).
        provider: ProviderId,
        /// Credentials discovered by the adapter.
        credentials: Credentials,
    },
}

impl IntegrationParams {
    /// Build the `Connected` variant.
    pub fn connected(provider: ProviderId, credentials: Credentials) -> Self {
        Self::Connected {
            provider,
            credentials,
        }
    }

    /// Credentials held by the params, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::Connected { credentials, .. } if credentials.is_present() => Some(credentials),
            _ => None,
        }
    }

    /// Whether the params describe a connected account.
    pub fn is_connected(&self) -> bool {
        self.credentials().is_some()
    }
}

#[derive(Serialize, Deserialize, Default)]
struct RawIntegrationParams {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<ProviderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<Credentials>,
}

impl From<RawIntegrationParams> for IntegrationParams {
    fn from(raw: RawIntegrationParams) -> Self {
        match (raw.kind, raw.credentials) {
            (Some(provider), Some(credentials)) if credentials.is_present() => Self::Connected {
                provider,
                credentials,
            },
            _ => Self::Disconnected,
        }
    }
}

impl From<IntegrationParams> for RawIntegrationParams {
    fn from(params: IntegrationParams) -> Self {
        match params {
            IntegrationParams::Disconnected => Self::default(),
            IntegrationParams::Connected {
                provider,
                credentials,
            } => Self {
                kind: Some(provider),
                credentials: Some(credentials),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Wire responses
// ---------------------------------------------------------------------------

/// Body of a successful `authorize` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizeResponse {
    /// Provider consent page to navigate to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
}

/// Body of a `credentials` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CredentialsResponse {
    /// Stored credentials, when the account is connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    /// Backend explanation when nothing is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CredentialsResponse {
    /// Response carrying stored credentials.
    pub fn found(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            error: None,
        }
    }

    /// Response for an identity with nothing stored.
    pub fn not_found() -> Self {
        Self {
            credentials: None,
            error: Some("No credentials found".to_string()),
        }
    }

    /// Credentials, only when present and non-blank.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref().filter(|c| c.is_present())
    }
}
