use crmlink_models::Identity;
use crmlink_sdk::DEFAULT_BACKEND_URL;

/// Environment variable overriding the integration backend URL.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

// ── Parent view inputs ────────────────────────────────────────────────

/// The identity fields the hosting view collects.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentForm {
    pub user: String,
    pub org: String,
}

impl Default for ParentForm {
    fn default() -> Self {
        Self {
            user: "TestUser".to_string(),
            org: "TestOrg".to_string(),
        }
    }
}

impl ParentForm {
    /// `None` until both fields are filled in.
    pub fn identity(&self) -> Option<Identity> {
        Identity::from_parts(Some(self.user.trim()), Some(self.org.trim()))
    }
}

// ── Backend ───────────────────────────────────────────────────────────

pub fn backend_url() -> String {
    resolve_backend_url(std::env::var(BACKEND_URL_ENV).ok())
}

fn resolve_backend_url(configured: Option<String>) -> String {
    configured
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_requires_both_fields() {
        let mut form = ParentForm::default();
        assert_eq!(form.identity(), Some(Identity::new("TestUser", "TestOrg")));

        form.org = "   ".to_string();
        assert_eq!(form.identity(), None);
    }

    #[test]
    fn identity_ignores_surrounding_whitespace() {
        let form = ParentForm {
            user: " alice ".to_string(),
            org: "acme".to_string(),
        };
        assert_eq!(form.identity(), Some(Identity::new("alice", "acme")));
    }

    #[test]
    fn blank_backend_url_falls_back_to_default() {
        assert_eq!(resolve_backend_url(None), DEFAULT_BACKEND_URL);
        assert_eq!(resolve_backend_url(Some(String::new())), DEFAULT_BACKEND_URL);
        assert_eq!(
            resolve_backend_url(Some("http://backend:9000".into())),
            "http://backend:9000"
        );
    }
}
