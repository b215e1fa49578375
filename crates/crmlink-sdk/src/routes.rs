//! Canonical endpoint paths for the integration backend.
//!
//! All paths used by the adapter and served by the backend **must** be
//! built through [`IntegrationRoutes`] so that both sides agree on a single
//! naming convention.
//!
//! # Path layout
//!
//! ```text
//! /integrations/{provider}/authorize        ← POST form user_id, org_id
//! /integrations/{provider}/credentials      ← POST form user_id, org_id
//! /integrations/{provider}/get_items        ← POST form credentials
//! /integrations/{provider}/oauth2callback   ← GET  query code, state
//! ```
//!
//! # Store keys
//!
//! ```text
//! {provider}:credentials:{user_id}:{org_id}
//! ```

use crmlink_models::{Identity, ProviderId};

/// Central authority for endpoint paths and credential store keys.
///
/// # Examples
///
/// ```
/// use crmlink_models::ProviderId;
/// use crmlink_sdk::IntegrationRoutes;
///
/// let hubspot = ProviderId::new("hubspot");
/// assert_eq!(
///     IntegrationRoutes::authorize(&hubspot),
///     "/integrations/hubspot/authorize",
/// );
/// ```
pub struct IntegrationRoutes;

impl IntegrationRoutes {
    // ------------------------------------------------------------------
    // Adapter endpoints
    // ------------------------------------------------------------------

    /// Starts the OAuth flow; answers with `auth_url`.
    pub fn authorize(provider: &ProviderId) -> String {
        format!("/integrations/{provider}/authorize")
    }

    /// Returns stored credentials for an identity.
    pub fn credentials(provider: &ProviderId) -> String {
        format!("/integrations/{provider}/credentials")
    }

    /// Loads the provider's items using a credentials blob.
    pub fn get_items(provider: &ProviderId) -> String {
        format!("/integrations/{provider}/get_items")
    }

    /// Provider-specific alias of [`Self::get_items`]
    /// (`get_{provider}_items`) kept for older front ends.
    pub fn legacy_get_items(provider: &ProviderId) -> String {
        format!("/integrations/{provider}/get_{provider}_items")
    }

    // ------------------------------------------------------------------
    // Backend-only endpoints
    // ------------------------------------------------------------------

    /// Redirect target of the provider's consent page.
    pub fn oauth2callback(provider: &ProviderId) -> String {
        format!("/integrations/{provider}/oauth2callback")
    }

    // ------------------------------------------------------------------
    // Store keys
    // ------------------------------------------------------------------

    /// Key under which the backend stores an identity's credentials.
    pub fn credentials_key(provider: &ProviderId, identity: &Identity) -> String {
        format!(
            "{provider}:credentials:{}:{}",
            identity.user_id, identity.org_id
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
