use crmlink_models::{Identity, IntegrationParams};
use crmlink_sdk::{authorize, IntegrationApi, IntegrationClient, IntegrationView, SdkError, ViewState};
use dioxus::prelude::*;

use crate::i18n::{t, use_locale};
use crate::navigator::WebviewNavigator;

/// Connect / disconnect widget for one CRM provider.
///
/// `params` belongs to the parent; the widget writes it only when a
/// credential check finds credentials or the user disconnects.
#[component]
pub fn IntegrationWidget(
    identity: Option<Identity>,
    mut params: Signal<IntegrationParams>,
) -> Element {
    let client = use_context::<IntegrationClient>();
    let mut view = use_signal(|| {
        let mut view = IntegrationView::new(client.provider().clone());
        view.identity_changed(identity.as_ref());
        view
    });

    // Re-check stored credentials on mount and whenever the identity changes.
    {
        let client = client.clone();
        use_effect(use_reactive!(|identity| {
            if !view.write().identity_changed(identity.as_ref()) {
                return;
            }
            let Some(identity) = identity else {
                return;
            };
            let client = client.clone();
            spawn(async move {
                let result = client.fetch_credentials(&identity).await;
                if let Some(next) = view.write().credentials_checked(result) {
                    params.set(next);
                }
            });
        }));
    }

    let on_connect = {
        let identity = identity.clone();
        move |_: Event<MouseData>| {
            view.write().connect_started();
            let client = client.clone();
            let identity = identity.clone();
            spawn(async move {
                let result = match identity {
                    Some(identity) => authorize(&client, &identity, &WebviewNavigator).await,
                    None => Err(SdkError::Config("user and org are required".into())),
                };
                view.write().connect_finished(result);
            });
        }
    };

    let locale = use_locale();
    let tr = t(*locale.read());
    let provider = view.read().provider().clone();
    let state = view.read().state(&params.read());

    match state {
        ViewState::Loading => rsx! {
            div { class: "integration integration-loading",
                span { class: "spinner" }
                span { "{tr.checking_connection}" }
            }
        },
        ViewState::Error(message) => rsx! {
            div { class: "integration integration-error",
                span { class: "error-text", "{message}" }
                button { class: "btn", onclick: on_connect, "{tr.try_again}" }
            }
        },
        ViewState::Connected(_) => rsx! {
            div { class: "integration integration-connected",
                span { class: "connected-text", "{tr.connected_to} {provider}" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        let next = view.write().disconnect();
                        params.set(next);
                    },
                    "{tr.disconnect}"
                }
            }
        },
        ViewState::Disconnected => rsx! {
            div { class: "integration integration-disconnected",
                button { class: "btn btn-primary", onclick: on_connect, "{tr.connect_to} {provider}" }
            }
        },
    }
}
