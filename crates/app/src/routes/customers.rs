use dioxus::prelude::*;
use server::api::{create_customer, delete_customer, list_customers};
use shared_types::{AppError, CustomerInput, Page};
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, PageActions, PageHeader,
    PageTitle,
};
use std::collections::HashMap;

use crate::format_helpers::{format_timestamp, optional};
use crate::guard::RoleGuard;

#[component]
pub fn Customers() -> Element {
    rsx! {
        RoleGuard { allowed: Page::Customers.allowed_roles(),
            CustomerDirectory {}
        }
    }
}

/// Searchable customer list with an add form.
#[component]
fn CustomerDirectory() -> Element {
    let mut search = use_signal(String::new);
    let mut customers = use_resource(move || {
        let query = optional(search());
        async move { list_customers(query).await }
    });

    let mut show_form = use_signal(|| false);
    let mut error_msg = use_signal(|| Option::<String>::None);

    rsx! {
        PageHeader {
            PageTitle { "Customers" }
            PageActions {
                Button {
                    onclick: move |_| show_form.set(!show_form()),
                    if show_form() { "Close" } else { "Add Customer" }
                }
            }
        }

        if show_form() {
            CustomerForm {
                on_saved: move |_| {
                    show_form.set(false);
                    customers.restart();
                },
            }
        }

        input {
            class: "input search-input",
            r#type: "search",
            placeholder: "Search by name or phone",
            value: search(),
            oninput: move |e| search.set(e.value()),
        }

        if let Some(err) = error_msg() {
            div { class: "form-error", "{err}" }
        }

        match &*customers.read() {
            None => rsx! { p { class: "muted", "Loading customers..." } },
            Some(Err(e)) => rsx! {
                div { class: "form-error", {AppError::friendly_message(&e.to_string())} }
            },
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "No customers found." }
            },
            Some(Ok(list)) => rsx! {
                div { class: "record-list",
                    for customer in list.iter().cloned() {
                        div { key: "{customer.id}", class: "record",
                            div { class: "record-main",
                                strong { "{customer.name}" }
                                span { class: "muted", "{customer.phone}" }
                                if let Some(email) = &customer.email {
                                    span { class: "muted", "{email}" }
                                }
                                if let Some(address) = &customer.address {
                                    span { class: "muted", "{address}" }
                                }
                                span { class: "record-meta", "Added {format_timestamp(&customer.created_at)}" }
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: move |_| {
                                    let id = customer.id;
                                    spawn(async move {
                                        match delete_customer(id).await {
                                            Ok(()) => {
                                                error_msg.set(None);
                                                customers.restart();
                                            }
                                            Err(e) => error_msg.set(Some(AppError::friendly_message(&e.to_string()))),
                                        }
                                    });
                                },
                                "Delete"
                            }
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn CustomerForm(on_saved: EventHandler<()>) -> Element {
    let mut name = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut address = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let input = CustomerInput {
            name: name().trim().to_string(),
            phone: phone().trim().to_string(),
            email: optional(email()),
            address: optional(address()),
            notes: optional(notes()),
        };
        let result = create_customer(input).await;
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
                CardTitle { "New Customer" }
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
                    div { class: "form-field",
                        label { "Email" }
                        input { class: "input", r#type: "email", value: email(), oninput: move |e| email.set(e.value()) }
                        if let Some(err) = field_error("email") {
                            span { class: "field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { "Address" }
                        input { class: "input", value: address(), oninput: move |e| address.set(e.value()) }
                    }
                    div { class: "form-field",
                        label { "Notes" }
                        textarea { class: "input", value: notes(), oninput: move |e| notes.set(e.value()) }
                    }
                    Button { r#type: "submit", disabled: saving(),
                        if saving() { "Saving..." } else { "Save Customer" }
                    }
                }
            }
        }
    }
}
