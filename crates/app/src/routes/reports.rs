use dioxus::prelude::*;
use server::api::{get_dashboard_stats, list_bills};
use shared_types::{AppError, Bill, BillStatus, IconRef, Page};
use shared_ui::{Badge, Card, CardContent, CardHeader, CardTitle, StatCard};

use crate::format_helpers::{bill_status_variant, format_rupees};
use crate::guard::RoleGuard;

#[component]
pub fn Reports() -> Element {
    rsx! {
        RoleGuard { allowed: Page::Reports.allowed_roles(),
            ShopReport {}
        }
    }
}

/// `(status, bill count, sum of totals)` for every status, in display order.
fn totals_by_status(bills: &[Bill]) -> Vec<(BillStatus, usize, f64)> {
    BillStatus::ALL
        .into_iter()
        .map(|status| {
            let matching = bills.iter().filter(|b| b.status == status);
            let (count, sum) = matching.fold((0, 0.0), |(n, s), b| (n + 1, s + b.total));
            (status, count, sum)
        })
        .collect()
}

/// Headline numbers plus a per-status breakdown of bills.
#[component]
fn ShopReport() -> Element {
    let stats = use_resource(|| async { get_dashboard_stats().await });
    let bills = use_resource(|| async { list_bills(None).await });

    rsx! {
        match &*stats.read() {
            None => rsx! { p { class: "muted", "Loading report..." } },
            Some(Err(e)) => rsx! {
                div { class: "form-error", {AppError::friendly_message(&e.to_string())} }
            },
            Some(Ok(s)) => rsx! {
                div { class: "stat-grid",
                    StatCard { label: "Revenue", value: format_rupees(s.total_revenue), icon: IconRef::BarChart }
                    StatCard { label: "Bills", value: s.total_bills.to_string(), icon: IconRef::Receipt }
                    StatCard { label: "Jobs", value: s.total_jobs.to_string(), icon: IconRef::Scissors }
                    StatCard { label: "Open Jobs", value: s.pending_jobs.to_string() }
                }
            },
        }

        Card {
            CardHeader {
                CardTitle { "Bills by status" }
            }
            CardContent {
                if let Some(Ok(list)) = &*bills.read() {
                    table { class: "report-table",
                        thead {
                            tr {
                                th { "Status" }
                                th { "Bills" }
                                th { "Value" }
                            }
                        }
                        tbody {
                            for (status, count, sum) in totals_by_status(list) {
                                tr { key: "{status.as_str()}",
                                    td {
                                        Badge { variant: bill_status_variant(status), "{status.label()}" }
                                    }
                                    td { "{count}" }
                                    td { "{format_rupees(sum)}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
