use dioxus::prelude::*;
use shared_types::{GuardState, RoleSet};

use crate::auth::use_auth;
use crate::routes::Route;

/// Renders `children` only for a signed-in role in `allowed`.
///
/// The decision is taken once when the page mounts and never revisited while
/// it stays mounted. A denied visitor is sent back to the sign-in page.
#[component]
pub fn RoleGuard(allowed: RoleSet, children: Element) -> Element {
    let auth = use_auth();
    let state = use_hook(|| GuardState::Checking.resolve(auth.role(), allowed));

    use_effect(move || {
        if state.should_redirect() {
            navigator().replace(Route::Home {});
        }
    });

    match state {
        GuardState::Authorized => children,
        GuardState::Denied => rsx! {
            div { class: "guard-fallback",
                p { "Redirecting..." }
            }
        },
        GuardState::Checking => rsx! {
            div { class: "guard-fallback",
                p { "Checking access..." }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthState;
    use shared_types::{AuthUser, Page, Role};

    fn user(role: Role) -> AuthUser {
        AuthUser {
            id: uuid::Uuid::nil(),
            username: role.as_str().to_string(),
            display_name: role.display_name().to_string(),
            role,
        }
    }

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn allowed_role_sees_the_page() {
        fn app() -> Element {
            use_context_provider(|| AuthState::new(Some(user(Role::Billing))));
            rsx! {
                RoleGuard { allowed: Page::Customers.allowed_roles(),
                    p { "customer list" }
                }
            }
        }
        let html = render(app);
        assert!(html.contains("customer list"));
        assert!(!html.contains("guard-fallback"));
    }

    #[test]
    fn other_role_gets_the_fallback() {
        fn app() -> Element {
            use_context_provider(|| AuthState::new(Some(user(Role::Tailor))));
            rsx! {
                RoleGuard { allowed: Page::Reports.allowed_roles(),
                    p { "shop report" }
                }
            }
        }
        let html = render(app);
        assert!(!html.contains("shop report"));
        assert!(html.contains("guard-fallback"));
        assert!(html.contains("Redirecting..."));
    }

    #[test]
    fn signed_out_visitor_gets_the_fallback() {
        fn app() -> Element {
            use_context_provider(|| AuthState::new(None));
            rsx! {
                RoleGuard { allowed: Page::Customers.allowed_roles(),
                    p { "customer list" }
                }
            }
        }
        let html = render(app);
        assert!(!html.contains("customer list"));
        assert!(html.contains("guard-fallback"));
    }
}
