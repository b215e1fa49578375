//! Mock CRM provider for local development.
//!
//! Stands in for HubSpot's OAuth endpoints and CRM objects API so the
//! integration backend can be exercised end to end without a real account:
//!
//! ```text
//! GET  /oauth/authorize              auto-approves, redirects with ?code&state
//! POST /oauth/v1/token               form code → access/refresh token
//! GET  /crm/v3/objects/{kind}        bearer token → canned `results`
//! ```
//!
//! Point the backend at it with `HUBSPOT_AUTHORIZE_URL`,
//! `HUBSPOT_TOKEN_URL` and `HUBSPOT_API_URL`.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Runtime settings, read once from the environment.
///
/// | Variable        | Default |
/// |-----------------|---------|
/// | `MOCK_CRM_PORT` | `4000`  |
struct MockConfig {
    port: u16,
}

impl MockConfig {
    fn from_env() -> Self {
        Self {
            port: std::env::var("MOCK_CRM_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
        }
    }
}

/// Access tokens handed out so far.
#[derive(Default)]
struct MockState {
    issued: RwLock<HashSet<String>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let MockConfig { port } = MockConfig::from_env();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!(port, "mock CRM listening on http://localhost:{port}");
    axum::serve(listener, app(Arc::new(MockState::default()))).await?;
    Ok(())
}

fn app(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/oauth/authorize", get(authorize))
        .route("/oauth/v1/token", post(token))
        .route("/crm/v3/objects/{kind}", get(objects))
        .with_state(state)
}

// --- Endpoints ---

#[derive(Deserialize)]
struct AuthorizeParams {
    client_id: Option<String>,
    redirect_uri: String,
    state: Option<String>,
}

async fn authorize(Query(params): Query<AuthorizeParams>) -> Response {
    info!(client_id = ?params.client_id, "authorize request");

    // Auto-approve: no consent page, a fresh code straight back to the caller.
    let code = Uuid::new_v4().simple().to_string();
    let state = params.state.unwrap_or_default();
    match reqwest::Url::parse_with_params(
        &params.redirect_uri,
        &[("code", code.as_str()), ("state", state.as_str())],
    ) {
        Ok(target) => Redirect::to(target.as_str()).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("invalid redirect_uri: {e}") })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct TokenRequest {
    code: String,
    // grant_type, client_id, client_secret and redirect_uri are accepted but not checked
}

async fn token(State(state): State<Arc<MockState>>, Form(req): Form<TokenRequest>) -> Response {
    if req.code.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "BAD_AUTH_CODE", "message": "missing code" })),
        )
            .into_response();
    }
    info!(code = %req.code, "token request");

    let access_token = format!("mock-access-{}", Uuid::new_v4().simple());
    state.issued.write().await.insert(access_token.clone());

    Json(json!({
        "access_token": access_token,
        "refresh_token": format!("mock-refresh-{}", Uuid::new_v4().simple()),
        "token_type": "bearer",
        "expires_in": 1800
    }))
    .into_response()
}

async fn objects(
    State(state): State<Arc<MockState>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
) -> Response {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let authorized = match token {
        Some(token) => state.issued.read().await.contains(token),
        None => false,
    };
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": "error", "category": "INVALID_AUTHENTICATION" })),
        )
            .into_response();
    }

    match sample_objects(&kind) {
        Some(results) => Json(json!({ "results": results })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "error", "message": format!("unknown object type {kind}") })),
        )
            .into_response(),
    }
}

/// Canned CRM objects, timestamped relative to now.
fn sample_objects(kind: &str) -> Option<Vec<Value>> {
    let created = (Utc::now() - Duration::days(30)).to_rfc3339();
    let updated = (Utc::now() - Duration::days(1)).to_rfc3339();

    let objects = match kind {
        "contacts" => vec![
            json!({ "id": "101", "properties": { "firstname": "Ada", "lastname": "Lovelace", "email": "ada@example.com" } }),
            json!({ "id": "102", "properties": { "firstname": "Alan", "lastname": "Turing", "email": "alan@example.com" } }),
        ],
        "companies" => vec![
            json!({ "id": "201", "properties": { "name": "Analytical Engines Ltd", "domain": "engines.example.com" } }),
        ],
        "deals" => vec![
            json!({ "id": "301", "properties": { "name": "Difference Engine No. 2", "amount": "17000" } }),
        ],
        _ => return None,
    };

    Some(
        objects
            .into_iter()
            .map(|mut object| {
                object["createdAt"] = json!(created);
                object["updatedAt"] = json!(updated);
                object
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;

    fn server() -> TestServer {
        TestServer::new(app(Arc::new(MockState::default()))).unwrap()
    }

    #[tokio::test]
    async fn authorize_redirects_with_code_and_state() {
        let res = server()
            .get("/oauth/authorize")
            .add_query_params(&[
                ("client_id", "client-1"),
                ("redirect_uri", "http://localhost:8000/integrations/hubspot/oauth2callback"),
                ("state", "TestUser:TestOrg"),
            ])
            .await;

        res.assert_status(StatusCode::SEE_OTHER);
        let location = res.header("location");
        let location = location.to_str().unwrap();
        assert!(location.starts_with("http://localhost:8000/integrations/hubspot/oauth2callback?code="));
        assert!(location.ends_with("&state=TestUser%3ATestOrg"));
    }

    #[tokio::test]
    async fn issued_token_unlocks_objects() {
        let server = server();

        let token: Value = server
            .post("/oauth/v1/token")
            .form(&[("grant_type", "authorization_code"), ("code", "abc")])
            .await
            .json();
        let access_token = token["access_token"].as_str().unwrap().to_string();

        let res = server
            .get("/crm/v3/objects/contacts")
            .authorization_bearer(&access_token)
            .await;
        res.assert_status_ok();
        let body: Value = res.json();
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
        assert!(body["results"][0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let res = server()
            .get("/crm/v3/objects/deals")
            .authorization_bearer("forged")
            .await;
        res.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_kind_has_no_samples() {
        assert!(sample_objects("tickets").is_none());
        assert!(sample_objects("deals").is_some());
    }
}
