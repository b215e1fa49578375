use crmlink_sdk::Navigator;
use dioxus::prelude::*;
use tracing::info;

/// Replaces the webview location, leaving the app for the provider's
/// consent page.
pub struct WebviewNavigator;

impl Navigator for WebviewNavigator {
    fn navigate(&self, url: &str) {
        info!(%url, "navigating to provider authorization");
        let _ = document::eval(&navigation_script(url));
    }
}

/// `window.location.href = "<url>";` with the URL as an escaped JS string.
pub fn navigation_script(url: &str) -> String {
    let literal = serde_json::Value::String(url.to_string()).to_string();
    format!("window.location.href = {literal};")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_quoted() {
        assert_eq!(
            navigation_script("https://app.hubspot.com/oauth/authorize?state=u:o"),
            r#"window.location.href = "https://app.hubspot.com/oauth/authorize?state=u:o";"#
        );
    }

    #[test]
    fn quotes_cannot_break_out() {
        let script = navigation_script(r#"https://x/"; alert(1); ""#);
        assert_eq!(
            script,
            r#"window.location.href = "https://x/\"; alert(1); \"";"#
        );
    }
}
