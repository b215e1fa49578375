//! Drives an [`IntegrationView`] against an [`IntegrationApi`].
//!
//! [`IntegrationSession`] sequences the adapter's requests the way the
//! widget does: a credential check on mount, `authorize` on Connect, and a
//! local reset on Disconnect. Changes to the parent's params go through the
//! `set_params` callback passed to each operation.

use std::time::Duration;

use crmlink_models::{Identity, IntegrationParams};
use tracing::debug;

use crate::client::{authorize, IntegrationApi};
use crate::error::SdkError;
use crate::navigator::Navigator;
use crate::view::{IntegrationView, ViewState};

/// One mounted integration widget.
pub struct IntegrationSession<A, N> {
    api: A,
    navigator: N,
    view: IntegrationView,
}

impl<A, N> IntegrationSession<A, N>
where
    A: IntegrationApi,
    N: Navigator,
{
    /// New session; the view starts idle until [`mount`](Self::mount).
    pub fn new(api: A, navigator: N) -> Self {
        let view = IntegrationView::new(api.provider().clone());
        Self {
            api,
            navigator,
            view,
        }
    }

    /// The underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The view state machine.
    pub fn view(&self) -> &IntegrationView {
        &self.view
    }

    /// What to render given the parent's params.
    pub fn state(&self, params: &IntegrationParams) -> ViewState {
        self.view.state(params)
    }

    /// Mount (or re-mount after an identity change).
    ///
    /// With a full identity, issues exactly one credential check and calls
    /// `set_params` once if credentials were found.
    pub async fn mount<F>(&mut self, identity: Option<&Identity>, mut set_params: F)
    where
        F: FnMut(IntegrationParams),
    {
        let Some(identity) = identity else {
            self.view.identity_changed(None);
            return;
        };
        self.view.identity_changed(Some(identity));
        let result = self.api.fetch_credentials(identity).await;
        if let Some(params) = self.view.credentials_checked(result) {
            set_params(params);
        }
    }

    /// "Connect" / "Try Again".
    ///
    /// Without a full identity the attempt fails like any other request.
    pub async fn connect(&mut self, identity: Option<&Identity>) {
        self.view.connect_started();
        let result = match identity {
            Some(identity) => authorize(&self.api, identity, &self.navigator).await,
            None => Err(SdkError::Config("user and org are required".into())),
        };
        self.view.connect_finished(result);
    }

    /// "Disconnect": clears the parent's params.
    pub fn disconnect<F>(&mut self, mut set_params: F)
    where
        F: FnMut(IntegrationParams),
    {
        set_params(self.view.disconnect());
    }

    /// Repeat the credential check until credentials appear or `attempts`
    /// checks have been made, sleeping `interval` in between.
    ///
    /// Returns `true` once `set_params` has been called with credentials.
    pub async fn poll_credentials<F>(
        &mut self,
        identity: &Identity,
        interval: Duration,
        attempts: u32,
        mut set_params: F,
    ) -> bool
    where
        F: FnMut(IntegrationParams),
    {
        for attempt in 1..=attempts {
            self.view.identity_changed(Some(identity));
            let result = self.api.fetch_credentials(identity).await;
            if let Some(params) = self.view.credentials_checked(result) {
                set_params(params);
                return true;
            }
            debug!(%identity, attempt, attempts, "no credentials yet");
            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crmlink_models::{
        AuthorizeResponse, Credentials, CredentialsResponse, ItemsResponse, Provider, ProviderId,
    };

    use super::*;

    /// Canned backend answers plus call counters.
    struct FakeApi {
        provider: Provider,
        /// `Err(())` makes the call fail.
        credentials: Result<Option<&'static str>, ()>,
        auth_url: Result<Option<&'static str>, ()>,
        credential_checks: AtomicUsize,
        authorizations: AtomicUsize,
    }

    impl FakeApi {
        fn new(
            credentials: Result<Option<&'static str>, ()>,
            auth_url: Result<Option<&'static str>, ()>,
        ) -> Self {
            Self {
                provider: Provider::hubspot(),
                credentials,
                auth_url,
                credential_checks: AtomicUsize::new(0),
                authorizations: AtomicUsize::new(0),
            }
        }
    }

    impl IntegrationApi for FakeApi {
        fn provider(&self) -> &Provider {
            &self.provider
        }

        async fn request_authorization(
            &self,
            _identity: &Identity,
        ) -> Result<AuthorizeResponse, SdkError> {
            self.authorizations.fetch_add(1, Ordering::SeqCst);
            self.auth_url
                .map(|url| AuthorizeResponse {
                    auth_url: url.map(String::from),
                })
                .map_err(|()| SdkError::Config("authorize rejected".into()))
        }

        async fn fetch_credentials(
            &self,
            _identity: &Identity,
        ) -> Result<CredentialsResponse, SdkError> {
            self.credential_checks.fetch_add(1, Ordering::SeqCst);
            match self.credentials {
                Ok(Some(blob)) => Ok(CredentialsResponse::found(Credentials::new(blob))),
                Ok(None) => Ok(CredentialsResponse::not_found()),
                Err(()) => Err(SdkError::Config("credentials rejected".into())),
            }
        }

        async fn load_data(&self, _credentials: &Credentials) -> Result<ItemsResponse, SdkError> {
            Ok(ItemsResponse::default())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator(Mutex<Vec<String>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) {
            self.0.lock().unwrap().push(url.to_string());
        }
    }

    fn session(api: FakeApi) -> IntegrationSession<FakeApi, RecordingNavigator> {
        IntegrationSession::new(api, RecordingNavigator::default())
    }

    fn identity() -> Identity {
        Identity::new("TestUser", "TestOrg")
    }

    #[tokio::test]
    async fn mount_issues_one_check_and_sets_params_once() {
        let mut s = session(FakeApi::new(Ok(Some("blob")), Ok(None)));
        let mut calls = Vec::new();

        s.mount(Some(&identity()), |p| calls.push(p)).await;

        assert_eq!(s.api().credential_checks.load(Ordering::SeqCst), 1);
        assert_eq!(
            calls,
            vec![IntegrationParams::connected(
                ProviderId::new("hubspot"),
                Credentials::new("blob")
            )]
        );
        assert_eq!(
            s.state(&calls[0]),
            ViewState::Connected(Credentials::new("blob"))
        );
    }

    #[tokio::test]
    async fn mount_without_identity_issues_nothing() {
        let mut s = session(FakeApi::new(Ok(Some("blob")), Ok(None)));
        let mut calls = Vec::new();

        s.mount(None, |p| calls.push(p)).await;

        assert_eq!(s.api().credential_checks.load(Ordering::SeqCst), 0);
        assert!(calls.is_empty());
        assert_eq!(s.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[tokio::test]
    async fn failed_or_empty_check_shows_connect_prompt() {
        for credentials in [Ok(None), Err(())] {
            let mut s = session(FakeApi::new(credentials, Ok(None)));
            let mut calls = Vec::new();

            s.mount(Some(&identity()), |p| calls.push(p)).await;

            assert!(calls.is_empty());
            assert_eq!(s.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
        }
    }

    #[tokio::test]
    async fn connect_navigates_to_auth_url() {
        let mut s = session(FakeApi::new(Ok(None), Ok(Some("https://x"))));

        s.connect(Some(&identity())).await;

        assert_eq!(s.navigator.0.lock().unwrap().as_slice(), ["https://x"]);
        assert_eq!(s.api().authorizations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connect_without_auth_url_does_not_navigate() {
        let mut s = session(FakeApi::new(Ok(None), Ok(None)));

        s.connect(Some(&identity())).await;

        assert!(s.navigator.0.lock().unwrap().is_empty());
        assert_eq!(s.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[tokio::test]
    async fn rejected_connect_shows_error_and_retry_reinvokes() {
        let mut s = session(FakeApi::new(Ok(None), Err(())));

        s.connect(Some(&identity())).await;
        assert_eq!(
            s.state(&IntegrationParams::Disconnected),
            ViewState::Error("Failed to connect to HubSpot".into())
        );

        // "Try Again"
        s.connect(Some(&identity())).await;
        assert_eq!(s.api().authorizations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn connect_without_identity_fails_visibly() {
        let mut s = session(FakeApi::new(Ok(None), Ok(Some("https://x"))));

        s.connect(None).await;

        assert_eq!(s.api().authorizations.load(Ordering::SeqCst), 0);
        assert!(matches!(
            s.state(&IntegrationParams::Disconnected),
            ViewState::Error(_)
        ));
    }

    #[tokio::test]
    async fn disconnect_clears_params_and_shows_connect() {
        let mut s = session(FakeApi::new(Ok(Some("blob")), Ok(None)));
        let mut params = IntegrationParams::Disconnected;
        s.mount(Some(&identity()), |p| params = p).await;
        assert!(params.is_connected());

        let mut calls = Vec::new();
        s.disconnect(|p| calls.push(p));

        assert_eq!(calls, vec![IntegrationParams::Disconnected]);
        assert_eq!(s.state(&calls[0]), ViewState::Disconnected);
    }

    #[tokio::test]
    async fn poll_gives_up_after_attempts() {
        let mut s = session(FakeApi::new(Ok(None), Ok(None)));

        let found = s
            .poll_credentials(&identity(), Duration::from_millis(5), 3, |_| {})
            .await;

        assert!(!found);
        assert_eq!(s.api().credential_checks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn poll_stops_at_first_hit() {
        let mut s = session(FakeApi::new(Ok(Some("blob")), Ok(None)));
        let mut calls = Vec::new();

        let found = s
            .poll_credentials(&identity(), Duration::from_secs(2), 5, |p| calls.push(p))
            .await;

        assert!(found);
        assert_eq!(calls.len(), 1);
        assert_eq!(s.api().credential_checks.load(Ordering::SeqCst), 1);
    }
}
