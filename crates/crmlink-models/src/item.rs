//! Integration items returned by `get_items`.
//!
//! The backend flattens the provider's CRM objects into a list of
//! [`IntegrationItem`]s: one folder per [`ItemKind`], each followed by the
//! objects of that kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CRM object collections exposed as item folders.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    /// People.
    Contacts,
    /// Organisations.
    Companies,
    /// Opportunities.
    Deals,
}

impl ItemKind {
    /// Folder label shown to the user.
    pub fn folder_name(self) -> &'static str {
        match self {
            Self::Contacts => "Contacts",
            Self::Companies => "Companies",
            Self::Deals => "Deals",
        }
    }
}

/// One entry of the flattened item list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IntegrationItem {
    /// Provider object id, or the kind for folders.
    pub id: String,
    /// `"folder"` for folders, otherwise the kind (`"contacts"`, ...).
    #[serde(rename = "type")]
    pub item_type: String,
    /// Whether this entry is a folder.
    pub directory: bool,
    /// Folder id this entry belongs to.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Creation time reported by the provider.
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    /// Last modification time reported by the provider.
    #[serde(default)]
    pub last_modified_time: Option<DateTime<Utc>>,
    /// Link to the object in the provider's web app.
    #[serde(default)]
    pub url: Option<String>,
}

impl IntegrationItem {
    /// Root folder for a kind.
    pub fn folder(kind: ItemKind) -> Self {
        Self {
            id: kind.to_string(),
            item_type: "folder".to_string(),
            directory: true,
            parent_id: None,
            name: Some(kind.folder_name().to_string()),
            creation_time: None,
            last_modified_time: None,
            url: None,
        }
    }

    /// Map a provider CRM object (`{id, properties, createdAt, updatedAt}`)
    /// to an item.
    ///
    /// `app_url` is the base of the provider's web app; the item URL is
    /// `{app_url}/{kind}/{id}`.
    pub fn from_crm_object(object: &Value, kind: ItemKind, app_url: &str) -> Self {
        let id = match &object["id"] {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        };
        let properties = &object["properties"];

        Self {
            id: id.clone().unwrap_or_default(),
            item_type: kind.to_string(),
            directory: false,
            parent_id: Some(kind.to_string()),
            name: Some(display_name(properties)),
            creation_time: parse_timestamp(&object["createdAt"]),
            last_modified_time: parse_timestamp(&object["updatedAt"]),
            url: id.map(|id| format!("{}/{kind}/{id}", app_url.trim_end_matches('/'))),
        }
    }
}

/// `properties.name`, falling back to `"{firstname} {lastname}"`.
fn display_name(properties: &Value) -> String {
    if let Some(name) = properties["name"].as_str().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    let first = properties["firstname"].as_str().unwrap_or_default();
    let last = properties["lastname"].as_str().unwrap_or_default();
    format!("{first} {last}")
}

/// Accepts epoch milliseconds (number or numeric string) or RFC 3339.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => s
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .or_else(|| {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }),
        _ => None,
    }
}

/// Body of a `get_items` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemsResponse {
    /// Flattened item list.
    #[serde(default)]
    pub items: Vec<IntegrationItem>,
    /// Backend explanation when loading failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
