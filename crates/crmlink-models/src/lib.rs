#![deny(missing_docs)]

//! # crmlink Models
//!
//! Core data types shared by the CRM integration adapter, its backend and
//! the hosts that render it.
//!
//! ## Data flow
//!
//! ```text
//! Identity (user_id, org_id)
//! ├── authorize   ──► AuthorizeResponse   { auth_url? }
//! ├── credentials ──► CredentialsResponse { credentials? | error? }
//! │                     └── IntegrationParams::Connected { type, credentials }
//! └── get_items   ──► ItemsResponse       { items: [IntegrationItem] }
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identity`] | Principal identity (`UserId`, `OrgId`, `Identity`) |
//! | [`provider`] | CRM provider identity and display name |
//! | [`integration`] | Credentials, integration params, wire responses |
//! | [`item`] | Integration items returned by `get_items` |

pub mod error;
pub mod identity;
pub mod integration;
pub mod item;
pub mod provider;

// Re-export all public types at crate root for convenience.
pub use error::*;
pub use identity::*;
pub use integration::*;
pub use item::*;
pub use provider::*;
