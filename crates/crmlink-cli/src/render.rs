//! Plain-text rendering of adapter state and items.

use std::fmt::Write as _;

use crmlink_models::{IntegrationItem, Provider};
use crmlink_sdk::ViewState;

/// One line describing what the widget would show.
pub fn state_line(state: &ViewState, provider: &Provider) -> String {
    match state {
        ViewState::Loading => format!("Checking {provider} connection..."),
        ViewState::Error(message) => format!("✗ {message}"),
        ViewState::Connected(_) => format!("✓ Connected to {provider}"),
        ViewState::Disconnected => format!("Not connected to {provider}"),
    }
}

/// Folders as headings, their items indented below.
pub fn items_table(items: &[IntegrationItem]) -> String {
    let mut out = String::new();
    for item in items {
        let name = item.name.as_deref().unwrap_or("(unnamed)");
        if item.directory {
            let _ = writeln!(out, "{name}/");
            continue;
        }
        let modified = item
            .last_modified_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "  {:<10} {:<32} {modified}", item.id, name);
    }
    out
}

#[cfg(test)]
mod tests {
    use crmlink_models::{Credentials, ItemKind};
    use serde_json::json;

    use super::*;

    #[test]
    fn state_lines_name_the_provider() {
        let hubspot = Provider::hubspot();
        assert_eq!(
            state_line(&ViewState::Connected(Credentials::new("{}")), &hubspot),
            "✓ Connected to HubSpot"
        );
        assert_eq!(
            state_line(&ViewState::Disconnected, &hubspot),
            "Not connected to HubSpot"
        );
        assert_eq!(
            state_line(&ViewState::Error("Failed to connect to HubSpot".into()), &hubspot),
            "✗ Failed to connect to HubSpot"
        );
    }

    #[test]
    fn folders_head_their_items() {
        let contact = IntegrationItem::from_crm_object(
            &json!({
                "id": "101",
                "properties": { "firstname": "Ada", "lastname": "Lovelace" },
                "updatedAt": "2024-03-01T10:30:00Z"
            }),
            ItemKind::Contacts,
            "https://app.hubspot.com",
        );
        let table = items_table(&[IntegrationItem::folder(ItemKind::Contacts), contact]);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with('/'));
        assert!(lines[1].starts_with("  101"));
        assert!(lines[1].contains("Ada Lovelace"));
        assert!(lines[1].ends_with("2024-03-01 10:30"));
    }
}
