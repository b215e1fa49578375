//! Principal identity.
//!
//! The hosting application identifies the requesting principal with a pair
//! of opaque identifiers: a [`UserId`] and an [`OrgId`]. Neither is
//! validated locally; the backend is the only authority on their meaning.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string slice.
            pub fn new(id: &str) -> Self {
                Self(id.to_string())
            }

            /// Return the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of the user on whose behalf requests are made.
    ///
    /// ```
    /// use crmlink_models::UserId;
    ///
    /// let id = UserId::new("TestUser");
    /// assert_eq!(id.to_string(), "TestUser");
    /// ```
    UserId
);

opaque_id!(
    /// Identifier of the organisation the user belongs to.
    OrgId
);

/// The identity pair `(user_id, org_id)` sent with every account-scoped
/// request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Requesting user.
    pub user_id: UserId,
    /// Requesting organisation.
    pub org_id: OrgId,
}

impl Identity {
    /// Build an identity from its two parts.
    pub fn new(user_id: impl Into<UserId>, org_id: impl Into<OrgId>) -> Self {
        Self {
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }

    /// Build an identity only when both parts are present and non-empty.
    ///
    /// Hosts hand the adapter whatever they currently hold; an empty string
    /// counts as absent.
    ///
    /// ```
    /// use crmlink_models::Identity;
    ///
    /// assert!(Identity::from_parts(Some("u"), Some("o")).is_some());
    /// assert!(Identity::from_parts(Some("u"), Some("")).is_none());
    /// assert!(Identity::from_parts(None, Some("o")).is_none());
    /// ```
    pub fn from_parts(user_id: Option<&str>, org_id: Option<&str>) -> Option<Self> {
        match (user_id, org_id) {
            (Some(user), Some(org)) if !user.is_empty() && !org.is_empty() => {
                Some(Self::new(user, org))
            }
            _ => None,
        }
    }

    /// Form fields carried by `authorize` and `credentials` requests.
    pub fn form_fields(&self) -> [(&'static str, &str); 2] {
        [
            ("user_id", self.user_id.as_str()),
            ("org_id", self.org_id.as_str()),
        ]
    }

    /// Encode the identity as an OAuth `state` value (`{user_id}:{org_id}`).
    pub fn to_oauth_state(&self) -> String {
        format!("{}:{}", self.user_id, self.org_id)
    }

    /// Decode an OAuth `state` value produced by [`to_oauth_state`](Self::to_oauth_state).
    pub fn from_oauth_state(state: &str) -> Result<Self, ModelError> {
        state
            .split_once(':')
            .map(|(user, org)| Self::new(user, org))
            .ok_or_else(|| ModelError::InvalidState {
                value: state.to_string(),
            })
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user_id, self.org_id)
    }
}
