use crate::auth::use_auth;
use crate::routes::route_for_path;
use dioxus::prelude::*;
use shared_types::{AppError, FeatureFlags, SiteMetadata};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};
use std::collections::HashMap;

/// Demo logins shown under the form when demo accounts are seeded.
const DEMO_LOGINS: [(&str, &str, &str); 3] = [
    ("Admin", "admin", "admin123"),
    ("Tailor", "tailor", "tailor123"),
    ("Billing", "billing", "billing123"),
];

/// Sign-in page. A signed-in visitor is sent straight to their role's landing page.
#[component]
pub fn Home() -> Element {
    let mut auth = use_auth();
    let flags: FeatureFlags = use_context();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    use_effect(move || {
        if let Some(role) = auth.role() {
            navigator().replace(route_for_path(role.landing_path()));
        }
    });

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(username(), password()).await {
            Ok(user) => auth.set_user(user),
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    rsx! {
        div { class: "auth-page",
            div { class: "auth-brand",
                h1 { "{SiteMetadata::BRAND}" }
                p { "Business Management System" }
            }
            Card {
                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Enter your username and password" }
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "form-error", "{err}" }
                    }
                    form { class: "form", onsubmit: handle_login,
                        div { class: "form-field",
                            label { r#for: "username", "Username" }
                            input {
                                class: "input",
                                id: "username",
                                autocomplete: "username",
                                value: username(),
                                oninput: move |e| username.set(e.value()),
                            }
                            if let Some(err) = field_errors.read().get("username") {
                                span { class: "field-error", "{err}" }
                            }
                        }
                        div { class: "form-field",
                            label { r#for: "password", "Password" }
                            input {
                                class: "input",
                                id: "password",
                                r#type: "password",
                                autocomplete: "current-password",
                                value: password(),
                                oninput: move |e| password.set(e.value()),
                            }
                            if let Some(err) = field_errors.read().get("password") {
                                span { class: "field-error", "{err}" }
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "button auth-submit",
                            "data-style": "primary",
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                    if flags.demo_accounts {
                        div { class: "demo-logins",
                            p { class: "demo-logins-title", "Demo accounts" }
                            for (label, user, pass) in DEMO_LOGINS {
                                p { key: "{user}",
                                    strong { "{label}: " }
                                    code { "{user} / {pass}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
