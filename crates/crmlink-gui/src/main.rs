mod components;
mod i18n;
mod navigator;
mod state;

use crmlink_models::{IntegrationParams, Provider};
use crmlink_sdk::IntegrationClient;
use dioxus::prelude::*;
use tracing::info;

use components::data_panel::DataPanel;
use components::integration::IntegrationWidget;
use state::ParentForm;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let mut locale_signal = use_signal(|| i18n::Locale::En);
    use_context_provider(|| locale_signal);
    use_context_provider(|| {
        let backend_url = state::backend_url();
        info!(%backend_url, "using integration backend");
        IntegrationClient::with_base_url(&backend_url, Provider::hubspot())
    });

    let mut form = use_signal(ParentForm::default);
    // Owned here; the widget only proposes changes.
    let params = use_signal(IntegrationParams::default);

    let tr = i18n::t(*locale_signal.read());
    let next_locale = locale_signal.read().next().label();
    let ParentForm { user, org } = form.read().clone();
    let identity = form.read().identity();
    let credentials = params.read().credentials().cloned();
    let params_json = serde_json::to_string_pretty(&*params.read()).unwrap_or_default();

    rsx! {
        style { {include_str!("style.css")} }
        div { class: "app-root",
            header { class: "app-header",
                h1 { "{tr.app_title}" }
                button {
                    class: "locale-btn",
                    onclick: move |_| {
                        let next = locale_signal.read().next();
                        locale_signal.set(next);
                    },
                    "{next_locale}"
                }
            }

            section { class: "parent-form",
                div { class: "form-row",
                    label { "{tr.user_label}" }
                    input {
                        r#type: "text",
                        value: "{user}",
                        placeholder: "TestUser",
                        oninput: move |evt: Event<FormData>| form.write().user = evt.value(),
                    }
                }
                div { class: "form-row",
                    label { "{tr.org_label}" }
                    input {
                        r#type: "text",
                        value: "{org}",
                        placeholder: "TestOrg",
                        oninput: move |evt: Event<FormData>| form.write().org = evt.value(),
                    }
                }
                if identity.is_none() {
                    p { class: "hint", "{tr.identity_hint}" }
                }
            }

            IntegrationWidget { identity, params }

            details { class: "params-debug",
                summary { "{tr.params_label}" }
                pre { "{params_json}" }
            }

            if let Some(credentials) = credentials {
                DataPanel { credentials }
            }
        }
    }
}
