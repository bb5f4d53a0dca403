use dioxus::prelude::*;
use server::api::{create_tailor, delete_tailor, list_tailors, toggle_tailor_status};
use shared_types::{AppError, Page, TailorInput, TailorStatus};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, PageActions, PageHeader, PageTitle,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::format_helpers::optional;
use crate::guard::RoleGuard;

#[component]
pub fn Tailors() -> Element {
    rsx! {
        RoleGuard { allowed: Page::Tailors.allowed_roles(),
            TailorRoster {}
        }
    }
}

#[component]
fn TailorRoster() -> Element {
    let mut tailors = use_resource(|| async { list_tailors().await });
    let mut show_form = use_signal(|| false);
    let mut error_msg = use_signal(|| Option::<String>::None);

    let run = move |action: TailorAction, id: Uuid| {
        spawn(async move {
            let result = match action {
                TailorAction::Toggle => toggle_tailor_status(id).await.map(|_| ()),
                TailorAction::Delete => delete_tailor(id).await,
            };
            match result {
                Ok(()) => {
                    error_msg.set(None);
                    tailors.restart();
                }
                Err(e) => error_msg.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    rsx! {
        PageHeader {
            PageTitle { "Tailors" }
            PageActions {
                Button {
                    onclick: move |_| show_form.set(!show_form()),
                    if show_form() { "Close" } else { "Add Tailor" }
                }
            }
        }

        if show_form() {
            TailorForm {
                on_saved: move |_| {
                    show_form.set(false);
                    tailors.restart();
                },
            }
        }

        if let Some(err) = error_msg() {
            div { class: "form-error", "{err}" }
        }

        match &*tailors.read() {
            None => rsx! { p { class: "muted", "Loading tailors..." } },
            Some(Err(e)) => rsx! {
                div { class: "form-error", {AppError::friendly_message(&e.to_string())} }
            },
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "No tailors on the roster." }
            },
            Some(Ok(list)) => rsx! {
                div { class: "record-list",
                    for tailor in list.iter().cloned() {
                        div { key: "{tailor.id}", class: "record",
                            div { class: "record-main",
                                div { class: "record-title",
                                    strong { "{tailor.name}" }
                                    Badge {
                                        variant: if tailor.status == TailorStatus::Active { BadgeVariant::Success } else { BadgeVariant::Secondary },
                                        "{tailor.status.label()}"
                                    }
                                }
                                span { class: "muted", "{tailor.phone}" }
                                if let Some(specialty) = &tailor.specialization {
                                    span { "{specialty}" }
                                }
                                if let Some(exp) = &tailor.experience {
                                    span { class: "muted", "{exp} experience" }
                                }
                                if let Some(login) = &tailor.username {
                                    span { class: "record-meta", "Login: {login}" }
                                }
                            }
                            div { class: "record-actions",
                                Button {
                                    variant: ButtonVariant::Outline,
                                    onclick: move |_| run(TailorAction::Toggle, tailor.id),
                                    if tailor.status == TailorStatus::Active { "Deactivate" } else { "Activate" }
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: move |_| run(TailorAction::Delete, tailor.id),
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            },
        }
    }
}

#[derive(Clone, Copy)]
enum TailorAction {
    Toggle,
    Delete,
}

#[component]
fn TailorForm(on_saved: EventHandler<()>) -> Element {
    let mut name = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut specialization = use_signal(String::new);
    let mut experience = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let input = TailorInput {
            name: name().trim().to_string(),
            phone: phone().trim().to_string(),
            specialization: optional(specialization()),
            experience: optional(experience()),
            username: optional(username()),
            ..Default::default()
        };
        let result = create_tailor(input).await;
        saving.set(false);
        match result {
            Ok(_) => on_saved.call(()),
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
    };

    let field_error = move |field: &str| field_errors.read().get(field).cloned();

    rsx! {
        Card {
            CardHeader {
                CardTitle { "New Tailor" }
                CardDescription { "Link a login username so the tailor can see their jobs" }
            }
            CardContent {
                if let Some(err) = error_msg() {
                    div { class: "form-error", "{err}" }
                }
                form { class: "form", onsubmit: handle_submit,
                    div { class: "form-field",
                        label { "Name" }
                        input { class: "input", value: name(), oninput: move |e| name.set(e.value()) }
                        if let Some(err) = field_error("name") {
                            span { class: "field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { "Phone" }
                        input { class: "input", r#type: "tel", value: phone(), oninput: move |e| phone.set(e.value()) }
                        if let Some(err) = field_error("phone") {
                            span { class: "field-error", "{err}" }
                        }
                    }
                    div { class: "form-row",
                        div { class: "form-field",
                            label { "Specialization" }
                            input { class: "input", placeholder: "Suits, Blouses...", value: specialization(), oninput: move |e| specialization.set(e.value()) }
                        }
                        div { class: "form-field",
                            label { "Experience" }
                            input { class: "input", placeholder: "5 years", value: experience(), oninput: move |e| experience.set(e.value()) }
                        }
                    }
                    div { class: "form-field",
                        label { "Login username" }
                        input { class: "input", value: username(), oninput: move |e| username.set(e.value()) }
                        if let Some(err) = field_error("username") {
                            span { class: "field-error", "{err}" }
                        }
                    }
                    Button { r#type: "submit", disabled: saving(),
                        if saving() { "Saving..." } else { "Save Tailor" }
                    }
                }
            }
        }
    }
}
