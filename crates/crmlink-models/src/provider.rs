//! CRM provider identity.
//!
//! A [`ProviderId`] is the constant string that names an integration in
//! endpoint paths (`/integrations/{provider}/...`) and in the `type` field of
//! [`IntegrationParams`](crate::IntegrationParams). A [`Provider`] pairs it
//! with the human-readable name shown in the UI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a CRM provider (e.g. `"hubspot"`).
///
/// ```
/// use crmlink_models::ProviderId;
///
/// let id = ProviderId::new("hubspot");
/// assert_eq!(id.as_str(), "hubspot");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Create a new `ProviderId` from a string slice.
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A CRM provider the adapter can connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Path / type identifier.
    pub id: ProviderId,
    /// Name shown to the user (`"HubSpot"`).
    pub display_name: String,
}

impl Provider {
    /// Create a provider descriptor.
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: ProviderId::new(id),
            display_name: display_name.to_string(),
        }
    }

    /// The HubSpot CRM.
    pub fn hubspot() -> Self {
        Self::new("hubspot", "HubSpot")
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
