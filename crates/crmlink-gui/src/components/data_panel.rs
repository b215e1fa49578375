use crmlink_models::{Credentials, IntegrationItem};
use crmlink_sdk::{IntegrationApi, IntegrationClient};
use dioxus::prelude::*;

use crate::i18n::{t, use_locale};

/// Loads the provider's items with the parent's credentials and lists them.
#[component]
pub fn DataPanel(credentials: Credentials) -> Element {
    let client = use_context::<IntegrationClient>();
    let locale = use_locale();
    let tr = t(*locale.read());

    let mut items: Signal<Option<Vec<IntegrationItem>>> = use_signal(|| None);
    let mut loading = use_signal(|| false);
    let mut error_msg: Signal<Option<String>> = use_signal(|| None);

    let load_failed_label = tr.load_failed;
    let on_load = move |_| {
        loading.set(true);
        error_msg.set(None);
        let client = client.clone();
        let credentials = credentials.clone();
        spawn(async move {
            match client.load_data(&credentials).await {
                Ok(response) => {
                    if let Some(error) = response.error {
                        error_msg.set(Some(format!("{load_failed_label}: {error}")));
                    }
                    items.set(Some(response.items));
                }
                Err(e) => error_msg.set(Some(format!("{load_failed_label}: {e}"))),
            }
            loading.set(false);
        });
    };

    rsx! {
        section { class: "data-panel",
            div { class: "data-panel-header",
                h2 { "{tr.data_title}" }
                button {
                    class: "btn",
                    disabled: *loading.read(),
                    onclick: on_load,
                    {
                        let label = if *loading.read() { tr.loading_items } else { tr.load_data };
                        rsx! { "{label}" }
                    }
                }
            }

            if let Some(ref err) = *error_msg.read() {
                div { class: "error-banner", "{err}" }
            }

            if let Some(ref items) = *items.read() {
                if items.is_empty() {
                    p { class: "placeholder", "{tr.no_items}" }
                }
                ul { class: "item-list",
                    for item in items.iter() {
                        {
                            let name = item.name.clone().unwrap_or_else(|| item.id.clone());
                            let modified = item
                                .last_modified_time
                                .map(|t| t.format("%Y-%m-%d %H:%M").to_string());
                            if item.directory {
                                rsx! {
                                    li { key: "folder-{item.id}", class: "item-folder", "{name}" }
                                }
                            } else {
                                rsx! {
                                    li { key: "{item.item_type}-{item.id}", class: "item-row",
                                        if let Some(ref url) = item.url {
                                            a { href: "{url}", target: "_blank", "{name}" }
                                        } else {
                                            span { "{name}" }
                                        }
                                        if let Some(ref modified) = modified {
                                            span { class: "item-modified", "{modified}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
