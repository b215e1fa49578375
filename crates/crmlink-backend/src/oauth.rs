//! OAuth authorization-code flow against the CRM provider.
//!
//! [`authorization_url`] builds the consent page URL the adapter navigates
//! to; [`exchange_code`] trades the code the provider sends back for a token
//! document, which is stored verbatim as the user's credentials.

use crmlink_models::{Credentials, Identity, TokenSet};

use crate::config::ProviderConfig;
use crate::error::BackendError;

/// Consent page URL for `identity`.
///
/// The identity travels through the provider in the `state` parameter
/// (`{user_id}:{org_id}`) and comes back on the callback.
pub fn authorization_url(
    provider: &ProviderConfig,
    identity: &Identity,
) -> Result<String, BackendError> {
    let scope = provider.scopes.join(" ");
    let state = identity.to_oauth_state();
    let url = reqwest::Url::parse_with_params(
        &provider.authorize_url,
        &[
            ("client_id", provider.client_id.as_str()),
            ("redirect_uri", provider.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", state.as_str()),
        ],
    )
    .map_err(|e| BackendError::Config(format!("invalid authorize URL: {e}")))?;
    Ok(url.into())
}

/// Exchange an authorization code for the provider's token document.
///
/// The raw response body is returned as [`Credentials`] once it is known to
/// carry an `access_token`.
pub async fn exchange_code(
    http: &reqwest::Client,
    provider: &ProviderConfig,
    code: &str,
) -> Result<Credentials, BackendError> {
    let res = http
        .post(&provider.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", provider.client_id.as_str()),
            ("client_secret", provider.client_secret.as_str()),
            ("redirect_uri", provider.redirect_uri.as_str()),
            ("code", code),
        ])
        .send()
        .await?;

    if !res.status().is_success() {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        return Err(BackendError::TokenExchangeFailed(format!(
            "provider returned {status}: {text}"
        )));
    }

    let body = res.text().await?;
    let token: TokenSet = serde_json::from_str(&body)
        .map_err(|e| BackendError::TokenExchangeFailed(format!("unreadable token response: {e}")))?;
    if token.access_token.as_deref().is_none_or(str::is_empty) {
        return Err(BackendError::TokenExchangeFailed(
            "missing access_token".into(),
        ));
    }

    Ok(Credentials::new(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ProviderConfig {
        ProviderConfig {
            client_id: "client-1".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost:8000/integrations/hubspot/oauth2callback".into(),
            authorize_url: "https://app.hubspot.com/oauth/authorize".into(),
            token_url: "http://127.0.0.1:9/token".into(),
            api_url: "http://127.0.0.1:9".into(),
            app_url: "https://app.hubspot.com".into(),
            scopes: vec!["contacts".into(), "companies".into(), "deals".into()],
        }
    }

    #[test]
    fn authorization_url_carries_client_scope_and_state() {
        let url = authorization_url(&provider(), &Identity::new("TestUser", "TestOrg")).unwrap();
        let parsed = reqwest::Url::parse(&url).unwrap();
        let query: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.starts_with("https://app.hubspot.com/oauth/authorize?"));
        assert!(query.contains(&("client_id".into(), "client-1".into())));
        assert!(query.contains(&("scope".into(), "contacts companies deals".into())));
        assert!(query.contains(&("state".into(), "TestUser:TestOrg".into())));
        assert!(query.contains(&(
            "redirect_uri".into(),
            "http://localhost:8000/integrations/hubspot/oauth2callback".into()
        )));
    }

    #[test]
    fn authorization_url_rejects_bad_base() {
        let mut cfg = provider();
        cfg.authorize_url = "not a url".into();
        let err = authorization_url(&cfg, &Identity::new("u", "o")).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }
}
