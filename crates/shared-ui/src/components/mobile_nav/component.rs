use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdLogOut, LdMenu, LdX};
use dioxus_free_icons::Icon;
use shared_types::{is_active, navigation_for, Role, SiteMetadata, DRAWER_NAV};

use crate::components::{NavIcon, RoleBadge, Sheet, SheetSide};

/// Menu button opening a slide-out drawer with every page the role may open.
///
/// Like the bottom bar, nothing is rendered when the role sees no entries.
/// Choosing an entry closes the drawer before navigating.
#[component]
pub fn MobileNav(
    role: Option<Role>,
    username: Option<String>,
    current_path: String,
    on_navigate: EventHandler<String>,
    #[props(default)] on_logout: Option<EventHandler<()>>,
) -> Element {
    let mut open = use_signal(|| false);

    let Some(entries) = navigation_for(DRAWER_NAV, role, usize::MAX) else {
        return rsx! {};
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "mobile-nav",
            button {
                class: "mobile-nav-trigger",
                r#type: "button",
                aria_label: "Open menu",
                onclick: move |_| open.set(true),
                Icon::<LdMenu> { icon: LdMenu, width: 20, height: 20 }
            }
            Sheet {
                open: open(),
                on_close: move |_| open.set(false),
                side: SheetSide::Left,
                div { class: "mobile-nav-header",
                    div {
                        h2 { class: "mobile-nav-brand", "{SiteMetadata::BRAND}" }
                        if let (Some(name), Some(role)) = (username.clone(), role) {
                            div { class: "mobile-nav-user",
                                span { "{name}" }
                                RoleBadge { role }
                            }
                        }
                    }
                    button {
                        class: "mobile-nav-close",
                        r#type: "button",
                        aria_label: "Close menu",
                        onclick: move |_| open.set(false),
                        Icon::<LdX> { icon: LdX, width: 16, height: 16 }
                    }
                }
                nav { class: "mobile-nav-items",
                    for entry in entries {
                        button {
                            key: "{entry.path}",
                            class: "mobile-nav-item",
                            r#type: "button",
                            "data-active": if is_active(&current_path, entry.path) { "true" } else { "false" },
                            onclick: move |_| {
                                open.set(false);
                                on_navigate.call(entry.path.to_string());
                            },
                            NavIcon { icon: entry.icon }
                            span { "{entry.label}" }
                        }
                    }
                }
                if let Some(on_logout) = on_logout {
                    div { class: "mobile-nav-footer",
                        button {
                            class: "button mobile-nav-logout",
                            r#type: "button",
                            onclick: move |_| {
                                open.set(false);
                                on_logout.call(());
                            },
                            Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                            "Logout"
                        }
                    }
                }
            }
        }
    }
}
