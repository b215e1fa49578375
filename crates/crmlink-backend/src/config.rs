//! Integration backend configuration.
//!
//! Holds the OAuth client registration and the provider endpoints. The
//! configuration is built from environment variables at startup and
//! injected into Axum handlers via [`axum::extract::State`].

use crmlink_models::Provider;

/// OAuth client registration and endpoints of the CRM provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// OAuth client id issued by the provider.
    pub client_id: String,
    /// OAuth client secret issued by the provider.
    pub client_secret: String,
    /// Where the provider sends the user back (our `oauth2callback`).
    pub redirect_uri: String,
    /// Provider consent page (e.g. `https://app.hubspot.com/oauth/authorize`).
    pub authorize_url: String,
    /// Provider token endpoint (e.g. `https://api.hubapi.com/oauth/v1/token`).
    pub token_url: String,
    /// Base URL of the CRM objects API.
    pub api_url: String,
    /// Base URL of the provider web app, used for item links.
    pub app_url: String,
    /// Requested scopes.
    pub scopes: Vec<String>,
}

/// Global configuration shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Provider served by this backend.
    pub provider: Provider,
    /// OAuth parameters for that provider.
    pub oauth: ProviderConfig,
    /// Port to listen on (default `8000`).
    pub listen_port: u16,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                 | Default                                                   |
    /// |--------------------------|-----------------------------------------------------------|
    /// | `BACKEND_PORT`           | `8000`                                                    |
    /// | `HUBSPOT_CLIENT_ID`      | empty                                                     |
    /// | `HUBSPOT_CLIENT_SECRET`  | empty                                                     |
    /// | `HUBSPOT_REDIRECT_URI`   | `http://localhost:8000/integrations/hubspot/oauth2callback` |
    /// | `HUBSPOT_AUTHORIZE_URL`  | `https://app.hubspot.com/oauth/authorize`                 |
    /// | `HUBSPOT_TOKEN_URL`      | `https://api.hubapi.com/oauth/v1/token`                   |
    /// | `HUBSPOT_API_URL`        | `https://api.hubapi.com`                                  |
    /// | `HUBSPOT_APP_URL`        | `https://app.hubspot.com`                                 |
    /// | `HUBSPOT_SCOPES`         | `contacts,companies,deals`                                |
    ///
    /// Point the URL variables at `mock-crm` (`http://localhost:4000/...`)
    /// for local development.
    pub fn from_env() -> Self {
        let listen_port: u16 = std::env::var("BACKEND_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        let scopes = env_or("HUBSPOT_SCOPES", "contacts,companies,deals")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            provider: Provider::hubspot(),
            oauth: ProviderConfig {
                client_id: env_or("HUBSPOT_CLIENT_ID", ""),
                client_secret: env_or("HUBSPOT_CLIENT_SECRET", ""),
                redirect_uri: env_or(
                    "HUBSPOT_REDIRECT_URI",
                    "http://localhost:8000/integrations/hubspot/oauth2callback",
                ),
                authorize_url: env_or(
                    "HUBSPOT_AUTHORIZE_URL",
                    "https://app.hubspot.com/oauth/authorize",
                ),
                token_url: env_or("HUBSPOT_TOKEN_URL", "https://api.hubapi.com/oauth/v1/token"),
                api_url: env_or("HUBSPOT_API_URL", "https://api.hubapi.com"),
                app_url: env_or("HUBSPOT_APP_URL", "https://app.hubspot.com"),
                scopes,
            },
            listen_port,
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_hubspot() {
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.provider.id.as_str(), "hubspot");
        assert!(cfg.oauth.redirect_uri.ends_with("/integrations/hubspot/oauth2callback"));
    }

    #[test]
    fn default_listen_port() {
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.listen_port, 8000);
    }

    #[test]
    fn default_scopes() {
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.oauth.scopes, ["contacts", "companies", "deals"]);
    }
}
