use dioxus::prelude::*;
use server::api::get_dashboard_stats;
use shared_types::{AppError, IconRef, Page};
use shared_ui::{Card, CardContent, CardHeader, CardTitle, NavIcon, StatCard};

use crate::format_helpers::format_rupees;
use crate::guard::RoleGuard;
use crate::routes::Route;

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        RoleGuard { allowed: Page::AdminDashboard.allowed_roles(),
            DashboardOverview {}
        }
    }
}

/// Shop totals and shortcuts to the admin pages.
#[component]
fn DashboardOverview() -> Element {
    let stats = use_resource(|| async { get_dashboard_stats().await });

    let shortcuts = [
        (Route::Customers {}, "Customers", IconRef::Users),
        (Route::Billing {}, "New Bill", IconRef::Receipt),
        (Route::Tailors {}, "Tailors", IconRef::Scissors),
        (Route::Reports {}, "Reports", IconRef::BarChart),
    ];

    rsx! {
        match &*stats.read() {
            None => rsx! { p { class: "muted", "Loading dashboard..." } },
            Some(Err(e)) => rsx! {
                div { class: "form-error", {AppError::friendly_message(&e.to_string())} }
            },
            Some(Ok(s)) => rsx! {
                div { class: "stat-grid",
                    StatCard { label: "Customers", value: s.total_customers.to_string(), icon: IconRef::Users }
                    StatCard { label: "Bills", value: s.total_bills.to_string(), icon: IconRef::Receipt }
                    StatCard { label: "Tailors", value: s.total_tailors.to_string(), icon: IconRef::Scissors }
                    StatCard { label: "Pending Jobs", value: s.pending_jobs.to_string() }
                    StatCard { label: "Bills Today", value: s.today_bills.to_string() }
                    StatCard { label: "Revenue", value: format_rupees(s.total_revenue), icon: IconRef::BarChart }
                }
            },
        }
        Card {
            CardHeader {
                CardTitle { "Quick Actions" }
            }
            CardContent {
                div { class: "quick-actions",
                    for (to, label, icon) in shortcuts {
                        Link { key: "{label}", to, class: "quick-action",
                            NavIcon { icon }
                            span { "{label}" }
                        }
                    }
                }
            }
        }
    }
}
