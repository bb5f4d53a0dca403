use dioxus::prelude::*;

use crate::components::{Card, CardContent, NavIcon};
use shared_types::IconRef;

/// Headline number with a label, used on the dashboard and reports pages.
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] icon: Option<IconRef>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        Card {
            CardContent {
                div { class: "stat-card",
                    if let Some(icon) = icon {
                        span { class: "stat-card-icon", NavIcon { icon, size: 18 } }
                    }
                    span { class: "stat-card-value", "{value}" }
                    span { class: "stat-card-label", "{label}" }
                }
            }
        }
    }
}
