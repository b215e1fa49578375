//! HTTP client for the integration backend.
//!
//! [`IntegrationClient`] sends the three adapter requests as form-encoded
//! `POST`s and returns the parsed response bodies verbatim. There are no
//! retries, no timeout overrides and no shape validation beyond decoding.
//! Every failure is logged and then handed back to the caller.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use crmlink_models::{Identity, Provider};
//! use crmlink_sdk::{IntegrationApi, IntegrationClient};
//!
//! # async fn run() -> Result<(), crmlink_sdk::SdkError> {
//! let client = IntegrationClient::new(Provider::hubspot());
//! let identity = Identity::new("TestUser", "TestOrg");
//!
//! let response = client.fetch_credentials(&identity).await?;
//! if let Some(credentials) = response.credentials() {
//!     let items = client.load_data(credentials).await?;
//!     println!("{} items", items.items.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use crmlink_models::{
    AuthorizeResponse, Credentials, CredentialsResponse, Identity, ItemsResponse, Provider,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::SdkError;
use crate::navigator::Navigator;
use crate::routes::IntegrationRoutes;

/// Backend the adapter talks to unless a host says otherwise.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// The three backend requests the adapter relies on.
///
/// [`IntegrationClient`] is the HTTP implementation; hosts and tests can
/// substitute their own.
pub trait IntegrationApi {
    /// Provider this API talks to.
    fn provider(&self) -> &Provider;

    /// `POST /integrations/{provider}/authorize` with `user_id`, `org_id`.
    fn request_authorization(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<AuthorizeResponse, SdkError>> + Send;

    /// `POST /integrations/{provider}/credentials` with `user_id`, `org_id`.
    fn fetch_credentials(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<CredentialsResponse, SdkError>> + Send;

    /// `POST /integrations/{provider}/get_items` with `credentials`.
    fn load_data(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<ItemsResponse, SdkError>> + Send;
}

/// Start the OAuth flow for `identity`.
///
/// When the backend answers with an `auth_url`, `navigator` is sent there
/// and the URL is returned. Without one, nothing happens and `Ok(None)` is
/// returned. Errors are logged and propagated.
pub async fn authorize<A, N>(
    api: &A,
    identity: &Identity,
    navigator: &N,
) -> Result<Option<String>, SdkError>
where
    A: IntegrationApi + ?Sized,
    N: Navigator + ?Sized,
{
    let response = api.request_authorization(identity).await?;
    match response.auth_url {
        Some(url) => {
            info!(provider = %api.provider().id, %identity, "redirecting to provider consent page");
            navigator.navigate(&url);
            Ok(Some(url))
        }
        None => {
            debug!(provider = %api.provider().id, %identity, "authorize response carried no auth_url");
            Ok(None)
        }
    }
}

/// HTTP client for one provider's integration endpoints.
#[derive(Clone)]
pub struct IntegrationClient {
    http: reqwest::Client,
    base_url: String,
    provider: Provider,
}

impl IntegrationClient {
    /// Client against [`DEFAULT_BACKEND_URL`].
    pub fn new(provider: Provider) -> Self {
        Self::with_base_url(DEFAULT_BACKEND_URL, provider)
    }

    /// Client against an explicit backend (e.g. `http://127.0.0.1:8000`).
    pub fn with_base_url(base_url: &str, provider: Provider) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            provider,
        }
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_form<F, T>(&self, path: &str, form: &F) -> Result<T, SdkError>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self
            .http
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

impl IntegrationApi for IntegrationClient {
    fn provider(&self) -> &Provider {
        &self.provider
    }

    async fn request_authorization(
        &self,
        identity: &Identity,
    ) -> Result<AuthorizeResponse, SdkError> {
        let path = IntegrationRoutes::authorize(&self.provider.id);
        self.post_form(&path, &identity.form_fields())
            .await
            .inspect_err(|e| {
                error!(provider = %self.provider.id, error = %e, "error authorizing {}", self.provider);
            })
    }

    async fn fetch_credentials(&self, identity: &Identity) -> Result<CredentialsResponse, SdkError> {
        let path = IntegrationRoutes::credentials(&self.provider.id);
        self.post_form(&path, &identity.form_fields())
            .await
            .inspect_err(|e| {
                error!(provider = %self.provider.id, error = %e, "error getting {} credentials", self.provider);
            })
    }

    async fn load_data(&self, credentials: &Credentials) -> Result<ItemsResponse, SdkError> {
        let path = IntegrationRoutes::get_items(&self.provider.id);
        self.post_form(&path, &[("credentials", credentials.as_str())])
            .await
            .inspect_err(|e| {
                error!(provider = %self.provider.id, error = %e, "error loading {} data", self.provider);
            })
    }
}
