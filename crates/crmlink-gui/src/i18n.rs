use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Locale {
    Fr,
    En,
}

impl Locale {
    pub fn label(self) -> &'static str {
        match self {
            Locale::Fr => "FR",
            Locale::En => "EN",
        }
    }

    pub fn next(self) -> Locale {
        match self {
            Locale::Fr => Locale::En,
            Locale::En => Locale::Fr,
        }
    }
}

/// Get the current locale from Dioxus context.
/// Must be called inside a component where `provide_context` was used.
pub fn use_locale() -> Signal<Locale> {
    use_context::<Signal<Locale>>()
}

/// All translatable strings in the application.
/// Call `t(locale)` to get the struct for a given locale.
pub struct T {
    // ── Parent view ──
    pub app_title: &'static str,
    pub user_label: &'static str,
    pub org_label: &'static str,
    pub identity_hint: &'static str,
    pub params_label: &'static str,

    // ── Integration widget ──
    pub checking_connection: &'static str,
    pub connect_to: &'static str,
    pub connected_to: &'static str,
    pub disconnect: &'static str,
    pub try_again: &'static str,

    // ── Data panel ──
    pub data_title: &'static str,
    pub load_data: &'static str,
    pub loading_items: &'static str,
    pub no_items: &'static str,
    pub load_failed: &'static str,
}

pub fn t(locale: Locale) -> T {
    match locale {
        Locale::Fr => T {
            // Parent view
            app_title: "Intégrations CRM",
            user_label: "Utilisateur",
            org_label: "Organisation",
            identity_hint: "Renseignez l'utilisateur et l'organisation pour vérifier la connexion.",
            params_label: "Paramètres d'intégration",

            // Integration widget
            checking_connection: "Vérification de la connexion…",
            connect_to: "Se connecter à",
            connected_to: "Connecté à",
            disconnect: "Déconnecter",
            try_again: "Réessayer",

            // Data panel
            data_title: "Données",
            load_data: "Charger les données",
            loading_items: "Chargement…",
            no_items: "Aucun élément",
            load_failed: "Échec du chargement",
        },
        Locale::En => T {
            // Parent view
            app_title: "CRM integrations",
            user_label: "User",
            org_label: "Organization",
            identity_hint: "Fill in user and organization to check the connection.",
            params_label: "Integration parameters",

            // Integration widget
            checking_connection: "Checking connection…",
            connect_to: "Connect to",
            connected_to: "Connected to",
            disconnect: "Disconnect",
            try_again: "Try Again",

            // Data panel
            data_title: "Data",
            load_data: "Load data",
            loading_items: "Loading…",
            no_items: "No items",
            load_failed: "Loading failed",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_toggles() {
        assert_eq!(Locale::En.next(), Locale::Fr);
        assert_eq!(Locale::Fr.next().label(), "EN");
    }

    #[test]
    fn english_matches_widget_labels() {
        let tr = t(Locale::En);
        assert_eq!(format!("{} HubSpot", tr.connect_to), "Connect to HubSpot");
        assert_eq!(format!("{} HubSpot", tr.connected_to), "Connected to HubSpot");
        assert_eq!(tr.try_again, "Try Again");
    }
}
