use dioxus::prelude::*;
use server::api::{
    create_bill, create_job, get_upi_settings, list_bills, list_customers, list_tailors,
    update_bill_status,
};
use shared_types::{
    AppError, Bill, BillItem, BillStatus, CreateBillRequest, CreateJobRequest, JobPriority, Page,
    Role, TailorStatus,
};
use shared_ui::{
    Badge, Button, Card, CardContent, CardDescription, CardHeader, CardTitle, PageActions,
    PageHeader, PageTitle,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::use_auth;
use crate::format_helpers::{
    bill_status_variant, draft_amounts, format_due_date, format_rupees, optional, parse_amount,
};
use crate::guard::RoleGuard;

const GARMENTS: [&str; 7] = ["shirt", "trouser", "suit", "kurta", "sherwani", "blouse", "other"];

#[component]
pub fn Billing() -> Element {
    rsx! {
        RoleGuard { allowed: Page::Billing.allowed_roles(),
            BillBook {}
        }
    }
}

/// Bill list with a status filter, the new-bill form and, for admins, job assignment.
#[component]
fn BillBook() -> Element {
    let auth = use_auth();
    let is_admin = auth.role() == Some(Role::Admin);

    let mut filter = use_signal(String::new);
    let mut bills = use_resource(move || {
        let status = BillStatus::parse(&filter());
        async move { list_bills(status).await }
    });
    let upi = use_resource(|| async { get_upi_settings().await });

    let mut show_form = use_signal(|| false);
    let mut error_msg = use_signal(|| Option::<String>::None);

    rsx! {
        PageHeader {
            PageTitle { "Billing" }
            PageActions {
                Button {
                    onclick: move |_| show_form.set(!show_form()),
                    if show_form() { "Close" } else { "New Bill" }
                }
            }
        }

        if let Some(Ok(upi)) = &*upi.read() {
            p { class: "upi-line",
                "UPI: "
                strong { "{upi.upi_id}" }
                " ({upi.business_name})"
            }
        }

        if show_form() {
            BillForm {
                on_saved: move |_| {
                    show_form.set(false);
                    bills.restart();
                },
            }
        }

        select {
            class: "input status-filter",
            value: filter(),
            onchange: move |e| filter.set(e.value()),
            option { value: "", "All statuses" }
            for status in BillStatus::ALL {
                option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
            }
        }

        if let Some(err) = error_msg() {
            div { class: "form-error", "{err}" }
        }

        match &*bills.read() {
            None => rsx! { p { class: "muted", "Loading bills..." } },
            Some(Err(e)) => rsx! {
                div { class: "form-error", {AppError::friendly_message(&e.to_string())} }
            },
            Some(Ok(list)) if list.is_empty() => rsx! {
                p { class: "empty-state", "No bills yet." }
            },
            Some(Ok(list)) => rsx! {
                div { class: "record-list",
                    for bill in list.iter().cloned() {
                        BillRow {
                            key: "{bill.id}",
                            bill,
                            can_assign: is_admin,
                            on_changed: move |_| {
                                error_msg.set(None);
                                bills.restart();
                            },
                            on_error: move |msg| error_msg.set(Some(msg)),
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn BillRow(
    bill: Bill,
    can_assign: bool,
    on_changed: EventHandler<()>,
    on_error: EventHandler<String>,
) -> Element {
    let bill_id = bill.id;
    let closed = matches!(bill.status, BillStatus::Delivered | BillStatus::Cancelled);

    let set_status = move |e: FormEvent| {
        let Some(status) = BillStatus::parse(&e.value()) else {
            return;
        };
        spawn(async move {
            match update_bill_status(bill_id, status).await {
                Ok(_) => on_changed.call(()),
                Err(e) => on_error.call(AppError::friendly_message(&e.to_string())),
            }
        });
    };

    rsx! {
        div { class: "record",
            div { class: "record-main",
                div { class: "record-title",
                    strong { "#{bill.bill_number} {bill.customer_name}" }
                    Badge { variant: bill_status_variant(bill.status), "{bill.status.label()}" }
                }
                span { class: "muted",
                    {bill.items.iter().map(|i| format!("{} × {}", i.quantity, i.kind)).collect::<Vec<_>>().join(", ")}
                }
                span {
                    "Total {format_rupees(bill.total)} · Advance {format_rupees(bill.advance)} · Balance {format_rupees(bill.balance)}"
                }
                if let Some(due) = &bill.due_date {
                    span { class: "record-meta", "Due {format_due_date(due)}" }
                }
            }
            div { class: "record-actions",
                select {
                    class: "input",
                    disabled: closed,
                    value: bill.status.as_str(),
                    onchange: set_status,
                    for status in BillStatus::ALL {
                        option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
                    }
                }
                if can_assign && !closed {
                    AssignJob { bill_id, on_error }
                }
            }
        }
    }
}

/// Admin control handing a bill to an active tailor.
#[component]
fn AssignJob(bill_id: Uuid, on_error: EventHandler<String>) -> Element {
    let tailors = use_resource(|| async { list_tailors().await });
    let mut tailor_id = use_signal(String::new);
    let mut assigned = use_signal(|| false);

    let assign = move |_| {
        let Ok(tailor_id) = Uuid::parse_str(&tailor_id()) else {
            on_error.call("Choose a tailor first".to_string());
            return;
        };
        spawn(async move {
            let req = CreateJobRequest {
                bill_id,
                tailor_id,
                instructions: None,
                priority: JobPriority::default(),
                due_date: None,
            };
            match create_job(req).await {
                Ok(_) => assigned.set(true),
                Err(e) => on_error.call(AppError::friendly_message(&e.to_string())),
            }
        });
    };

    if assigned() {
        return rsx! { span { class: "record-meta", "Assigned" } };
    }

    let active: Vec<(Uuid, String)> = match &*tailors.read() {
        Some(Ok(list)) => list
            .iter()
            .filter(|t| t.status == TailorStatus::Active)
            .map(|t| (t.id, t.name.clone()))
            .collect(),
        _ => Vec::new(),
    };

    rsx! {
        div { class: "assign-job",
            select {
                class: "input",
                value: tailor_id(),
                onchange: move |e| tailor_id.set(e.value()),
                option { value: "", "Assign to..." }
                for (id, name) in active {
                    option { key: "{id}", value: "{id}", "{name}" }
                }
            }
            Button { onclick: assign, "Assign" }
        }
    }
}

#[component]
fn BillForm(on_saved: EventHandler<()>) -> Element {
    let customers = use_resource(|| async { list_customers(None).await });

    let mut customer_id = use_signal(String::new);
    let mut kind = use_signal(|| GARMENTS[0].to_string());
    let mut description = use_signal(String::new);
    let mut quantity = use_signal(|| "1".to_string());
    let mut price = use_signal(String::new);
    let mut discount = use_signal(String::new);
    let mut advance = use_signal(String::new);
    let mut due_date = use_signal(String::new);
    let mut instructions = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let item = move || BillItem {
        kind: kind(),
        description: description().trim().to_string(),
        quantity: quantity().trim().parse().unwrap_or(0),
        price: parse_amount(&price()).unwrap_or(0.0),
        measurements: HashMap::new(),
    };
    let (subtotal, total, balance) = draft_amounts(
        &[item()],
        parse_amount(&discount()).unwrap_or(0.0),
        parse_amount(&advance()).unwrap_or(0.0),
    );

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let Ok(customer) = Uuid::parse_str(&customer_id()) else {
            error_msg.set(Some("Choose a customer".to_string()));
            return;
        };
        let (Some(discount), Some(advance)) = (parse_amount(&discount()), parse_amount(&advance()))
        else {
            error_msg.set(Some("Amounts must be numbers of zero or more".to_string()));
            return;
        };
        let items = vec![item()];
        let (subtotal, total, balance) = draft_amounts(&items, discount, advance);

        saving.set(true);
        let req = CreateBillRequest {
            customer_id: customer,
            items,
            subtotal,
            discount,
            total,
            advance,
            balance,
            due_date: optional(due_date()),
            special_instructions: optional(instructions()),
            status: None,
        };
        let result = create_bill(req).await;
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

    rsx! {
        Card {
            CardHeader {
                CardTitle { "New Bill" }
                CardDescription { "One garment per bill line" }
            }
            CardContent {
                if let Some(err) = error_msg() {
                    div { class: "form-error", "{err}" }
                }
                for (field, err) in field_errors() {
                    div { key: "{field}", class: "field-error", "{err}" }
                }
                form { class: "form", onsubmit: handle_submit,
                    div { class: "form-field",
                        label { "Customer" }
                        select {
                            class: "input",
                            value: customer_id(),
                            onchange: move |e| customer_id.set(e.value()),
                            option { value: "", "Select customer" }
                            if let Some(Ok(list)) = &*customers.read() {
                                for c in list.iter() {
                                    option { key: "{c.id}", value: "{c.id}", "{c.name} ({c.phone})" }
                                }
                            }
                        }
                    }
                    div { class: "form-row",
                        div { class: "form-field",
                            label { "Garment" }
                            select {
                                class: "input",
                                value: kind(),
                                onchange: move |e| kind.set(e.value()),
                                for g in GARMENTS {
                                    option { key: "{g}", value: g, "{g}" }
                                }
                            }
                        }
                        div { class: "form-field",
                            label { "Qty" }
                            input { class: "input", r#type: "number", min: "1", value: quantity(), oninput: move |e| quantity.set(e.value()) }
                        }
                        div { class: "form-field",
                            label { "Price" }
                            input { class: "input", inputmode: "decimal", value: price(), oninput: move |e| price.set(e.value()) }
                        }
                    }
                    div { class: "form-field",
                        label { "Description" }
                        input { class: "input", value: description(), oninput: move |e| description.set(e.value()) }
                    }
                    div { class: "form-row",
                        div { class: "form-field",
                            label { "Discount" }
                            input { class: "input", inputmode: "decimal", value: discount(), oninput: move |e| discount.set(e.value()) }
                        }
                        div { class: "form-field",
                            label { "Advance" }
                            input { class: "input", inputmode: "decimal", value: advance(), oninput: move |e| advance.set(e.value()) }
                        }
                        div { class: "form-field",
                            label { "Due date" }
                            input { class: "input", r#type: "date", value: due_date(), oninput: move |e| due_date.set(e.value()) }
                        }
                    }
                    div { class: "form-field",
                        label { "Special instructions" }
                        textarea { class: "input", value: instructions(), oninput: move |e| instructions.set(e.value()) }
                    }
                    dl { class: "bill-summary",
                        dt { "Subtotal" }
                        dd { "{format_rupees(subtotal)}" }
                        dt { "Total" }
                        dd { "{format_rupees(total)}" }
                        dt { "Balance" }
                        dd { "{format_rupees(balance)}" }
                    }
                    Button { r#type: "submit", disabled: saving(),
                        if saving() { "Saving..." } else { "Create Bill" }
                    }
                }
            }
        }
    }
}
