use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::routes::{route_for_path, Route};

/// Catch-all page. Offers the way back to the visitor's own landing page.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let auth = use_auth();
    let path = format!("/{}", route.join("/"));

    let (back_to, back_label) = match auth.role() {
        Some(role) => (route_for_path(role.landing_path()), "Back to your dashboard"),
        None => (Route::Home {}, "Go to sign in"),
    };

    rsx! {
        div { class: "not-found-page",
            div { class: "not-found-code", "404" }
            h1 { "Page not found" }
            p { class: "muted",
                "Nothing lives at "
                code { "{path}" }
                "."
            }
            Link { to: back_to, class: "button", "{back_label}" }
        }
    }
}
