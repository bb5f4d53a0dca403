pub mod admin_dashboard;
pub mod billing;
pub mod customers;
pub mod home;
pub mod not_found;
pub mod reports;
pub mod tailor_jobs;
pub mod tailors;

use crate::auth::use_auth;
use dioxus::prelude::*;
use shared_types::{Page, SiteMetadata};
use shared_ui::{BottomNav, MobileNav, RoleBadge};

use admin_dashboard::AdminDashboard;
use billing::Billing;
use customers::Customers;
use home::Home;
use not_found::NotFound;
use reports::Reports;
use tailor_jobs::TailorJobs;
use tailors::Tailors;

/// Application routes. Guarded paths match `Page::path` one to one.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},
    #[layout(AppLayout)]
        #[route("/admin")]
        AdminDashboard {},
        #[route("/admin/customers")]
        Customers {},
        #[route("/admin/billing")]
        Billing {},
        #[route("/admin/tailors")]
        Tailors {},
        #[route("/admin/reports")]
        Reports {},
        #[route("/tailor")]
        TailorJobs {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Access-table entry for this route, if it is a guarded page.
    pub fn page(&self) -> Option<Page> {
        match self {
            Route::AdminDashboard {} => Some(Page::AdminDashboard),
            Route::Customers {} => Some(Page::Customers),
            Route::Billing {} => Some(Page::Billing),
            Route::Tailors {} => Some(Page::Tailors),
            Route::Reports {} => Some(Page::Reports),
            Route::TailorJobs {} => Some(Page::TailorJobs),
            Route::Home {} | Route::NotFound { .. } => None,
        }
    }
}

/// Route for a navigation path. Unknown paths land on the 404 page.
pub fn route_for_path(path: &str) -> Route {
    path.parse().unwrap_or_else(|_| Route::NotFound {
        route: path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Shell around every guarded page: header with the drawer menu, the page,
/// and the bottom bar. Both menus are filtered by the signed-in role.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let mut auth = use_auth();

    let role = auth.role();
    let current_path = route.to_string();
    let title = route.page().map(Page::title).unwrap_or(SiteMetadata::BRAND);

    let go_to = move |path: String| {
        navigator().push(route_for_path(&path));
    };

    let sign_out = move |_: ()| {
        spawn(async move {
            if let Err(e) = server::api::logout().await {
                tracing::warn!(error = %e, "Sign-out request failed");
            }
            auth.clear_auth();
            navigator().replace(Route::Home {});
        });
    };

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                MobileNav {
                    role,
                    username: auth.display_name(),
                    current_path: current_path.clone(),
                    on_navigate: go_to,
                    on_logout: EventHandler::new(sign_out),
                }
                div { class: "app-header-title",
                    span { class: "app-brand", "{SiteMetadata::BRAND}" }
                    h1 { "{title}" }
                }
                if let Some(role) = role {
                    RoleBadge { role }
                }
            }
            main { class: "app-content",
                Outlet::<Route> {}
            }
            BottomNav { role, current_path, on_navigate: go_to }
        }
    }
}
