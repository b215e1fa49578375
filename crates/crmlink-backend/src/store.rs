//! In-memory credential store.
//!
//! Keys follow [`IntegrationRoutes::credentials_key`]
//! (`{provider}:credentials:{user_id}:{org_id}`). Entries live for the
//! lifetime of the process.
//!
//! [`IntegrationRoutes::credentials_key`]: crmlink_sdk::IntegrationRoutes::credentials_key

use std::collections::HashMap;

use crmlink_models::{Credentials, Identity, ProviderId};
use crmlink_sdk::IntegrationRoutes;
use tokio::sync::RwLock;
use tracing::debug;

/// Credentials stored per provider and identity.
#[derive(Default)]
pub struct CredentialStore {
    entries: RwLock<HashMap<String, Credentials>>,
}

impl CredentialStore {
    /// Store (or replace) the credentials of `identity`.
    pub async fn put(&self, provider: &ProviderId, identity: &Identity, credentials: Credentials) {
        let key = IntegrationRoutes::credentials_key(provider, identity);
        debug!(%key, "storing credentials");
        self.entries.write().await.insert(key, credentials);
    }

    /// Credentials of `identity`, if any were stored.
    pub async fn get(&self, provider: &ProviderId, identity: &Identity) -> Option<Credentials> {
        let key = IntegrationRoutes::credentials_key(provider, identity);
        self.entries.read().await.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let store = CredentialStore::default();
        let hubspot = ProviderId::new("hubspot");
        let identity = Identity::new("u", "o");

        assert!(store.get(&hubspot, &identity).await.is_none());
        store.put(&hubspot, &identity, Credentials::new("blob")).await;
        assert_eq!(
            store.get(&hubspot, &identity).await,
            Some(Credentials::new("blob"))
        );
    }

    #[tokio::test]
    async fn entries_are_scoped_by_identity_and_provider() {
        let store = CredentialStore::default();
        let hubspot = ProviderId::new("hubspot");
        store
            .put(&hubspot, &Identity::new("u", "o"), Credentials::new("blob"))
            .await;

        assert!(store.get(&hubspot, &Identity::new("u", "other")).await.is_none());
        assert!(
            store
                .get(&ProviderId::new("salesforce"), &Identity::new("u", "o"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn put_replaces() {
        let store = CredentialStore::default();
        let hubspot = ProviderId::new("hubspot");
        let identity = Identity::new("u", "o");
        store.put(&hubspot, &identity, Credentials::new("old")).await;
        store.put(&hubspot, &identity, Credentials::new("new")).await;
        assert_eq!(
            store.get(&hubspot, &identity).await,
            Some(Credentials::new("new"))
        );
    }
}
