//! crmlink integration backend: OAuth broker and data relay for the CRM
//! integration adapter.
//!
//! For each identity (`user_id`, `org_id`) the service:
//!
//! 1. Hands out the provider consent URL (`authorize`).
//! 2. Receives the provider's redirect, exchanges the code for a token and
//!    stores it (`oauth2callback`).
//! 3. Returns the stored token as opaque credentials (`credentials`).
//! 4. Loads CRM objects on behalf of a credentials holder (`get_items`).

mod config;
mod error;
mod items;
mod oauth;
mod store;

use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, Json, Query, State};
use axum::routing::{get, post};
use crmlink_models::{
    AuthorizeResponse, Credentials, CredentialsResponse, Identity, ItemsResponse,
};
use crmlink_sdk::IntegrationRoutes;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::BackendError;
use crate::store::CredentialStore;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
struct AppState {
    /// Provider and OAuth configuration.
    config: AppConfig,
    /// Tokens obtained through the callback.
    store: CredentialStore,
    /// Outbound client for provider calls.
    http: reqwest::Client,
}

impl AppState {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            store: CredentialStore::default(),
            http: reqwest::Client::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Form body of `authorize` and `credentials`.
#[derive(Deserialize)]
struct IdentityForm {
    user_id: String,
    org_id: String,
}

impl From<IdentityForm> for Identity {
    fn from(form: IdentityForm) -> Self {
        Identity::new(form.user_id, form.org_id)
    }
}

/// Query of `oauth2callback`.
#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Form body of `get_items`.
#[derive(Deserialize)]
struct ItemsForm {
    credentials: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /integrations/{provider}/authorize`: return the consent page URL.
async fn authorize(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IdentityForm>,
) -> Result<Json<AuthorizeResponse>, BackendError> {
    let identity = Identity::from(form);
    let auth_url = oauth::authorization_url(&state.config.oauth, &identity)?;
    info!(provider = %state.config.provider.id, %identity, "authorization started");
    Ok(Json(AuthorizeResponse {
        auth_url: Some(auth_url),
    }))
}

/// `GET /integrations/{provider}/oauth2callback`: exchange the code and
/// store the token for the identity carried in `state`.
async fn oauth2callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<Value>, BackendError> {
    if let Some(error) = params.error {
        return Err(BackendError::AuthorizationDenied(error));
    }
    let code = params.code.ok_or(BackendError::MissingCode)?;
    let identity = Identity::from_oauth_state(params.state.as_deref().unwrap_or_default())
        .map_err(|e| BackendError::InvalidState(e.to_string()))?;

    let credentials = oauth::exchange_code(&state.http, &state.config.oauth, &code).await?;
    state
        .store
        .put(&state.config.provider.id, &identity, credentials)
        .await;

    info!(provider = %state.config.provider.id, %identity, "credentials stored");
    Ok(Json(json!({ "success": true })))
}

/// `POST /integrations/{provider}/credentials`: stored credentials, or
/// `{"error": "No credentials found"}`.
async fn credentials(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IdentityForm>,
) -> Json<CredentialsResponse> {
    let identity = Identity::from(form);
    match state.store.get(&state.config.provider.id, &identity).await {
        Some(credentials) => Json(CredentialsResponse::found(credentials)),
        None => {
            info!(provider = %state.config.provider.id, %identity, "no credentials stored");
            Json(CredentialsResponse::not_found())
        }
    }
}

/// `POST /integrations/{provider}/get_items`: load CRM objects with the
/// given credentials.
async fn get_items(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ItemsForm>,
) -> Result<Json<ItemsResponse>, BackendError> {
    let access_token = Credentials::new(form.credentials)
        .access_token()
        .map_err(|e| BackendError::InvalidCredentials(e.to_string()))?;

    let items = items::fetch_items(&state.http, &state.config.oauth, &access_token).await;
    info!(provider = %state.config.provider.id, count = items.len(), "items loaded");
    Ok(Json(ItemsResponse { items, error: None }))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn router(state: Arc<AppState>) -> Router {
    let provider = state.config.provider.id.clone();
    Router::new()
        .route(&IntegrationRoutes::authorize(&provider), post(authorize))
        .route(
            &IntegrationRoutes::oauth2callback(&provider),
            get(oauth2callback),
        )
        .route(&IntegrationRoutes::credentials(&provider), post(credentials))
        .route(&IntegrationRoutes::get_items(&provider), post(get_items))
        .route(
            &IntegrationRoutes::legacy_get_items(&provider),
            post(get_items),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();
    info!(
        provider = %config.provider.id,
        authorize_url = %config.oauth.authorize_url,
        token_url = %config.oauth.token_url,
        api_url = %config.oauth.api_url,
        "provider registered"
    );
    if config.oauth.client_id.is_empty() {
        warn!("HUBSPOT_CLIENT_ID is not set; the provider will reject authorization requests");
    }

    let listen_port = config.listen_port;
    let app = router(Arc::new(AppState::new(config)));

    let addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "integration backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
