use dioxus::prelude::*;
use server::api::{advance_job, list_jobs};
use shared_types::{AppError, JobStatus, Page};
use shared_ui::{Badge, Button, Card, CardContent, CardHeader, CardTitle, PageHeader, PageTitle};
use uuid::Uuid;

use crate::format_helpers::{
    advance_label, format_due_date, format_timestamp, job_status_variant, priority_variant,
};
use crate::guard::RoleGuard;

#[component]
pub fn TailorJobs() -> Element {
    rsx! {
        RoleGuard { allowed: Page::TailorJobs.allowed_roles(),
            JobBoard {}
        }
    }
}

/// The signed-in tailor's jobs, open ones first.
#[component]
fn JobBoard() -> Element {
    let mut jobs = use_resource(|| async { list_jobs().await });
    let mut error_msg = use_signal(|| Option::<String>::None);

    let advance = move |job_id: Uuid| {
        spawn(async move {
            match advance_job(job_id).await {
                Ok(_) => {
                    error_msg.set(None);
                    jobs.restart();
                }
                Err(e) => error_msg.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        PageHeader {
            PageTitle { "My Jobs" }
        }

        if let Some(err) = error_msg() {
            div { class: "form-error", "{err}" }
        }

        match &*jobs.read() {
            None => rsx! { p { class: "muted", "Loading jobs..." } },
            Some(Err(e)) => rsx! {
                div { class: "form-error", {AppError::friendly_message(&e.to_string())} }
            },
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "No jobs assigned yet." }
            },
            Some(Ok(list)) => {
                let mut ordered = list.clone();
                ordered.sort_by_key(|j| j.status == JobStatus::Completed);
                rsx! {
                    div { class: "job-grid",
                        for job in ordered {
                            Card { key: "{job.id}",
                                CardHeader {
                                    CardTitle { "{job.customer_name}" }
                                    div { class: "job-badges",
                                        Badge { variant: job_status_variant(job.status), "{job.status.label()}" }
                                        Badge { variant: priority_variant(job.priority), "{job.priority:?}" }
                                    }
                                }
                                CardContent {
                                    if let Some(text) = &job.instructions {
                                        p { "{text}" }
                                    }
                                    if let Some(due) = &job.due_date {
                                        p { class: "record-meta", "Due {format_due_date(due)}" }
                                    }
                                    p { class: "record-meta", "Assigned {format_timestamp(&job.assigned_at)}" }
                                    if let Some(label) = advance_label(job.status) {
                                        Button { onclick: move |_| advance(job.id), "{label}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
