//! Connection view state machine.
//!
//! [`IntegrationView`] tracks what the integration widget is doing (idle,
//! waiting on a request, showing a failure) while the parent view keeps the
//! canonical [`IntegrationParams`]. The rendered [`ViewState`] is derived
//! from both:
//!
//! ```text
//!               identity present
//!   (mount) ───────────────────────► Loading ──fetch_credentials──┐
//!      │ no identity                                              │
//!      ▼                                credentials ─► Connected  │
//!   Disconnected ◄──── none / failure (logged only) ◄─────────────┘
//!      │  ▲                                   │
//!  Connect  └────────── Disconnect ───────────┘
//!      ▼
//!   Loading ──authorize ok──► (navigated away)
//!      │
//!      └──authorize failed──► Error("Failed to connect to …") ──Try Again──► Loading
//! ```
//!
//! The view never stores credentials itself; every change to them is
//! returned to the caller as an [`IntegrationParams`] to hand to the parent.

use crmlink_models::{Credentials, CredentialsResponse, Identity, IntegrationParams, Provider};
use tracing::{error, info};

use crate::error::SdkError;

/// What the widget shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A request is in flight.
    Loading,
    /// Connecting failed; the message is shown with a "Try Again" action.
    Error(String),
    /// The parent holds credentials; a "Disconnect" action is offered.
    Connected(Credentials),
    /// Nothing connected; a "Connect" action is offered.
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Activity {
    Idle,
    Loading,
    Failed(String),
}

/// Widget-local state of one provider integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationView {
    provider: Provider,
    activity: Activity,
}

impl IntegrationView {
    /// A view that has not been mounted yet (renders `Disconnected`).
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            activity: Activity::Idle,
        }
    }

    /// Provider this view integrates with.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Fixed text shown when connecting fails.
    pub fn failure_message(&self) -> String {
        format!("Failed to connect to {}", self.provider)
    }

    // ------------------------------------------------------------------
    // Credential check (mount / identity change)
    // ------------------------------------------------------------------

    /// The host mounted the view or its identity changed.
    ///
    /// Returns `true` when a credential check must be issued; the view is
    /// then `Loading` until [`credentials_checked`](Self::credentials_checked).
    /// Without a full identity nothing changes.
    pub fn identity_changed(&mut self, identity: Option<&Identity>) -> bool {
        if identity.is_none() {
            return false;
        }
        self.activity = Activity::Loading;
        true
    }

    /// Apply the outcome of a credential check.
    ///
    /// Returns the params to propose to the parent when credentials were
    /// found. Failures are logged and otherwise treated like "not
    /// connected". Checks are not cancelled, so the last one to resolve wins.
    pub fn credentials_checked(
        &mut self,
        result: Result<CredentialsResponse, SdkError>,
    ) -> Option<IntegrationParams> {
        self.activity = Activity::Idle;
        match result {
            Ok(response) => response.credentials().cloned().map(|credentials| {
                info!(provider = %self.provider.id, "stored credentials found");
                IntegrationParams::connected(self.provider.id.clone(), credentials)
            }),
            Err(e) => {
                error!(provider = %self.provider.id, error = %e, "error checking {} credentials", self.provider);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Connect / Disconnect
    // ------------------------------------------------------------------

    /// The user pressed "Connect" or "Try Again".
    pub fn connect_started(&mut self) {
        self.activity = Activity::Loading;
    }

    /// Apply the outcome of `authorize`.
    ///
    /// On success the host has usually navigated away already; the view
    /// simply goes idle. On failure the fixed error message is shown.
    pub fn connect_finished<T>(&mut self, result: Result<T, SdkError>) {
        match result {
            Ok(_) => self.activity = Activity::Idle,
            Err(e) => {
                error!(provider = %self.provider.id, error = %e, "error connecting to {}", self.provider);
                self.activity = Activity::Failed(self.failure_message());
            }
        }
    }

    /// The user pressed "Disconnect". Returns the params to hand to the
    /// parent (always [`IntegrationParams::Disconnected`]).
    pub fn disconnect(&mut self) -> IntegrationParams {
        info!(provider = %self.provider.id, "disconnected by user");
        self.activity = Activity::Idle;
        IntegrationParams::Disconnected
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.activity == Activity::Loading
    }

    /// What to render given the parent's current params.
    pub fn state(&self, params: &IntegrationParams) -> ViewState {
        match &self.activity {
            Activity::Loading => ViewState::Loading,
            Activity::Failed(message) => ViewState::Error(message.clone()),
            Activity::Idle => params
                .credentials()
                .map_or(ViewState::Disconnected, |c| ViewState::Connected(c.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crmlink_models::ProviderId;

    use super::*;

    fn view() -> IntegrationView {
        IntegrationView::new(Provider::hubspot())
    }

    fn identity() -> Identity {
        Identity::new("TestUser", "TestOrg")
    }

    fn connected(blob: &str) -> IntegrationParams {
        IntegrationParams::connected(ProviderId::new("hubspot"), Credentials::new(blob))
    }

    #[test]
    fn unmounted_view_is_disconnected() {
        assert_eq!(view().state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[test]
    fn mount_with_identity_loads() {
        let mut v = view();
        assert!(v.identity_changed(Some(&identity())));
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Loading);
    }

    #[test]
    fn mount_without_identity_stays_disconnected() {
        let mut v = view();
        assert!(!v.identity_changed(None));
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[test]
    fn found_credentials_are_proposed_to_parent() {
        let mut v = view();
        v.identity_changed(Some(&identity()));
        let proposed = v.credentials_checked(Ok(CredentialsResponse::found(Credentials::new("c"))));
        assert_eq!(proposed, Some(connected("c")));
        assert_eq!(
            v.state(&connected("c")),
            ViewState::Connected(Credentials::new("c"))
        );
    }

    #[test]
    fn missing_credentials_resolve_to_disconnected() {
        let mut v = view();
        v.identity_changed(Some(&identity()));
        assert_eq!(v.credentials_checked(Ok(CredentialsResponse::not_found())), None);
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[test]
    fn failed_check_is_silent() {
        let mut v = view();
        v.identity_changed(Some(&identity()));
        let proposed = v.credentials_checked(Err(SdkError::Config("offline".into())));
        assert_eq!(proposed, None);
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[test]
    fn failed_connect_shows_fixed_message() {
        let mut v = view();
        v.connect_started();
        assert!(v.is_loading());
        v.connect_finished::<()>(Err(SdkError::Config("offline".into())));
        assert_eq!(
            v.state(&IntegrationParams::Disconnected),
            ViewState::Error("Failed to connect to HubSpot".into())
        );
    }

    #[test]
    fn retry_clears_error_while_loading() {
        let mut v = view();
        v.connect_started();
        v.connect_finished::<()>(Err(SdkError::Config("offline".into())));
        v.connect_started();
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Loading);
        v.connect_finished(Ok(None::<String>));
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[test]
    fn identity_change_clears_error() {
        let mut v = view();
        v.connect_finished::<()>(Err(SdkError::Config("offline".into())));
        v.identity_changed(Some(&identity()));
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Loading);
    }

    #[test]
    fn disconnect_clears_parent_params() {
        let mut v = view();
        assert_eq!(v.disconnect(), IntegrationParams::Disconnected);
        assert_eq!(v.state(&IntegrationParams::Disconnected), ViewState::Disconnected);
    }

    #[test]
    fn loading_takes_priority_over_params() {
        let mut v = view();
        v.connect_started();
        assert_eq!(v.state(&connected("c")), ViewState::Loading);
    }
}
