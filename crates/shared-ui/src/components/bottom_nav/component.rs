use dioxus::prelude::*;
use shared_types::{is_active, navigation_for, Role, BOTTOM_NAV, MAX_BOTTOM_NAV_ITEMS};

use crate::components::NavIcon;

/// Fixed mobile bar with the first few pages the role may open.
///
/// Renders nothing at all, not even the container, when the role is absent
/// or sees no entries. Clicking an entry hands its path to `on_navigate`.
#[component]
pub fn BottomNav(
    role: Option<Role>,
    current_path: String,
    on_navigate: EventHandler<String>,
) -> Element {
    let Some(entries) = navigation_for(BOTTOM_NAV, role, MAX_BOTTOM_NAV_ITEMS) else {
        return rsx! {};
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav { class: "bottom-nav", aria_label: "Main",
            for entry in entries {
                button {
                    key: "{entry.path}",
                    class: "bottom-nav-item",
                    r#type: "button",
                    "data-active": if is_active(&current_path, entry.path) { "true" } else { "false" },
                    onclick: move |_| on_navigate.call(entry.path.to_string()),
                    NavIcon { icon: entry.icon, size: 20 }
                    span { class: "bottom-nav-label", "{entry.label}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    fn labels(html: &str) -> Vec<&str> {
        html.split("<span class=\"bottom-nav-label\">")
            .skip(1)
            .filter_map(|rest| rest.split('<').next())
            .collect()
    }

    #[test]
    fn billing_gets_customers_and_billing() {
        fn app() -> Element {
            rsx! {
                BottomNav { role: Some(Role::Billing), current_path: "/admin/billing", on_navigate: |_: String| {} }
            }
        }
        let html = render(app);
        assert_eq!(labels(&html), vec!["Customers", "Billing"]);
    }

    #[test]
    fn admin_sees_four_entries_and_no_reports() {
        fn app() -> Element {
            rsx! {
                BottomNav { role: Some(Role::Admin), current_path: "/admin", on_navigate: |_: String| {} }
            }
        }
        let html = render(app);
        assert_eq!(labels(&html), vec!["Home", "Customers", "Billing", "Tailors"]);
        assert!(!html.contains("Reports"));
    }

    #[test]
    fn only_the_exact_path_is_marked_active() {
        fn app() -> Element {
            rsx! {
                BottomNav { role: Some(Role::Admin), current_path: "/admin/customers", on_navigate: |_: String| {} }
            }
        }
        let html = render(app);
        assert_eq!(html.matches(r#"data-active="true""#).count(), 1);
        assert_eq!(html.matches(r#"data-active="false""#).count(), 3);
    }

    #[test]
    fn signed_out_renders_no_container() {
        fn app() -> Element {
            rsx! {
                BottomNav { role: None, current_path: "/", on_navigate: |_: String| {} }
            }
        }
        let html = render(app);
        assert!(!html.contains("bottom-nav"));
        assert!(!html.contains("<nav"));
    }
}
