//! Loads CRM objects from the provider and flattens them into items.

use crmlink_models::{IntegrationItem, ItemKind};
use serde_json::Value;
use tracing::warn;

use crate::config::ProviderConfig;

/// Fetch every [`ItemKind`] concurrently and flatten the result.
///
/// Each kind contributes its folder followed by its objects. A kind whose
/// request fails contributes an empty folder.
pub async fn fetch_items(
    http: &reqwest::Client,
    provider: &ProviderConfig,
    access_token: &str,
) -> Vec<IntegrationItem> {
    let (contacts, companies, deals) = futures::join!(
        fetch_objects(http, provider, access_token, ItemKind::Contacts),
        fetch_objects(http, provider, access_token, ItemKind::Companies),
        fetch_objects(http, provider, access_token, ItemKind::Deals),
    );

    let mut items = Vec::with_capacity(3 + contacts.len() + companies.len() + deals.len());
    for (kind, objects) in [
        (ItemKind::Contacts, contacts),
        (ItemKind::Companies, companies),
        (ItemKind::Deals, deals),
    ] {
        items.push(IntegrationItem::folder(kind));
        items.extend(
            objects
                .iter()
                .map(|object| IntegrationItem::from_crm_object(object, kind, &provider.app_url)),
        );
    }
    items
}

/// `GET {api_url}/crm/v3/objects/{kind}` → `results`.
async fn fetch_objects(
    http: &reqwest::Client,
    provider: &ProviderConfig,
    access_token: &str,
    kind: ItemKind,
) -> Vec<Value> {
    let url = format!(
        "{}/crm/v3/objects/{kind}",
        provider.api_url.trim_end_matches('/')
    );

    let res = match http.get(&url).bearer_auth(access_token).send().await {
        Ok(res) => res,
        Err(e) => {
            warn!(%kind, error = %e, "CRM request failed");
            return Vec::new();
        }
    };
    if !res.status().is_success() {
        warn!(%kind, status = %res.status(), "CRM request rejected");
        return Vec::new();
    }

    match res.json::<Value>().await {
        Ok(mut body) => match body.get_mut("results").map(Value::take) {
            Some(Value::Array(results)) => results,
            _ => Vec::new(),
        },
        Err(e) => {
            warn!(%kind, error = %e, "unreadable CRM response");
            Vec::new()
        }
    }
}
