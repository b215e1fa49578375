//! # crmlink SDK
//!
//! The integration adapter that lets a user connect a CRM account through
//! the integration backend.
//!
//! The SDK provides:
//!
//! * [`IntegrationClient`]: form-encoded requests to the backend's
//!   `authorize`, `credentials` and `get_items` endpoints.
//! * [`IntegrationApi`]: the seam hosts and tests program against.
//! * [`IntegrationView`]: the connection state machine
//!   (`Loading` / `Error` / `Connected` / `Disconnected`).
//! * [`IntegrationSession`]: drives the view against an API and a
//!   [`Navigator`].
//! * [`IntegrationRoutes`]: canonical endpoint paths shared by the client
//!   and the backend.
//! * [`SdkError`]: unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use crmlink_models::{Identity, IntegrationParams, Provider};
//! use crmlink_sdk::{IntegrationClient, IntegrationSession};
//!
//! # async fn run() {
//! let client = IntegrationClient::new(Provider::hubspot());
//! let navigator = |url: &str| println!("open {url}");
//! let mut session = IntegrationSession::new(client, navigator);
//!
//! let mut params = IntegrationParams::Disconnected;
//! let identity = Identity::new("TestUser", "TestOrg");
//! session.mount(Some(&identity), |p| params = p).await;
//! # }
//! ```

pub mod client;
pub mod error;
pub mod navigator;
pub mod routes;
pub mod session;
pub mod view;

pub use client::{authorize, IntegrationApi, IntegrationClient, DEFAULT_BACKEND_URL};
pub use error::SdkError;
pub use navigator::Navigator;
pub use routes::IntegrationRoutes;
pub use session::IntegrationSession;
pub use view::{IntegrationView, ViewState};
