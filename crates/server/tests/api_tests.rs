//! Integration tests for the shop REST API.
//!
//! Run with: `cargo test -p server --features server --test api_tests`

#![cfg(feature = "server")]

mod common;

use axum::{http::StatusCode, Router};
use common::{
    delete_with_auth, get, get_with_auth, post_json_with_auth, put_json_with_auth,
    test_app_with_auth, token_for,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{Bill, BillStatus, Customer, DashboardStats, Job, JobStatus, Tailor};

async fn create_customer(app: &Router, token: &str, name: &str, phone: &str) -> Customer {
    let body = json!({ "name": name, "phone": phone });
    let (status, body) = post_json_with_auth(app, "/api/customers", &body.to_string(), token).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

async fn create_bill(app: &Router, token: &str, customer_id: &str, total: f64) -> Bill {
    let body = json!({
        "customer_id": customer_id,
        "items": [{
            "kind": "suit",
            "description": "Two piece suit",
            "quantity": 1,
            "price": total,
            "measurements": { "chest": "40" }
        }],
        "subtotal": total,
        "total": total,
        "advance": 500.0,
        "balance": total - 500.0,
        "due_date": "2026-11-01"
    });
    let (status, body) = post_json_with_auth(app, "/api/bills", &body.to_string(), token).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

async fn demo_tailor(app: &Router, admin: &str) -> Tailor {
    let (_, body) = get_with_auth(app, "/api/tailors", admin).await;
    let tailors: Vec<Tailor> = serde_json::from_str(&body).unwrap();
    tailors
        .into_iter()
        .find(|t| t.username.as_deref() == Some("tailor"))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Role gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_requests_are_rejected() {
    let app = test_app_with_auth();
    for uri in ["/api/customers", "/api/bills", "/api/tailors", "/api/jobs", "/api/dashboard/stats"] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn each_role_reaches_only_its_own_resources() {
    let app = test_app_with_auth();
    let admin = token_for(&app, "admin").await;
    let billing = token_for(&app, "billing").await;
    let tailor = token_for(&app, "tailor").await;

    let cases = [
        ("/api/customers", &admin, StatusCode::OK),
        ("/api/customers", &billing, StatusCode::OK),
        ("/api/customers", &tailor, StatusCode::FORBIDDEN),
        ("/api/bills", &billing, StatusCode::OK),
        ("/api/bills", &tailor, StatusCode::FORBIDDEN),
        ("/api/tailors", &admin, StatusCode::OK),
        ("/api/tailors", &billing, StatusCode::FORBIDDEN),
        ("/api/jobs", &tailor, StatusCode::OK),
        ("/api/jobs", &billing, StatusCode::FORBIDDEN),
        ("/api/dashboard/stats", &admin, StatusCode::OK),
        ("/api/dashboard/stats", &tailor, StatusCode::FORBIDDEN),
        ("/api/settings/upi", &tailor, StatusCode::OK),
    ];

    for (uri, token, expected) in cases {
        let (status, body) = get_with_auth(&app, uri, token).await;
        assert_eq!(status, expected, "{uri}: {body}");
    }
}

#[tokio::test]
async fn only_admin_updates_settings() {
    let app = test_app_with_auth();
    let billing = token_for(&app, "billing").await;
    let admin = token_for(&app, "admin").await;
    let body = json!({ "upi_id": "star@upi", "business_name": "STAR TAILORS" }).to_string();

    let (status, _) = put_json_with_auth(&app, "/api/settings/upi", &body, &billing).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = put_json_with_auth(&app, "/api/settings/upi", &body, &admin).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_with_auth(&app, "/api/settings/upi", &billing).await;
    let upi: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(upi["upi_id"], "star@upi");
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn customer_crud_and_search() {
    let app = test_app_with_auth();
    let token = token_for(&app, "billing").await;

    let ravi = create_customer(&app, &token, "Ravi Kumar", "9876500001").await;
    create_customer(&app, &token, "Anita Shah", "9876500002").await;

    let (_, body) = get_with_auth(&app, "/api/customers?search=ravi", &token).await;
    let found: Vec<Customer> = serde_json::from_str(&body).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, ravi.id);

    let update = json!({ "name": "Ravi K.", "phone": "9876500001", "notes": "Prefers slim fit" });
    let uri = format!("/api/customers/{}", ravi.id);
    let (status, body) = put_json_with_auth(&app, &uri, &update.to_string(), &token).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Customer = serde_json::from_str(&body).unwrap();
    assert_eq!(updated.name, "Ravi K.");
    assert_eq!(updated.notes.as_deref(), Some("Prefers slim fit"));

    let (status, _) = delete_with_auth(&app, &uri, &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get_with_auth(&app, &uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_phone_is_a_conflict() {
    let app = test_app_with_auth();
    let token = token_for(&app, "billing").await;
    create_customer(&app, &token, "Ravi", "9876500001").await;

    let body = json!({ "name": "Someone else", "phone": "9876500001" }).to_string();
    let (status, _) = post_json_with_auth(&app, "/api/customers", &body, &token).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bad_customer_input_is_rejected() {
    let app = test_app_with_auth();
    let token = token_for(&app, "billing").await;

    let body = json!({ "name": "", "phone": "123" }).to_string();
    let (status, _) = post_json_with_auth(&app, "/api/customers", &body, &token).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get_with_auth(&app, "/api/customers/not-a-uuid", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Bills
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bills_are_numbered_and_filterable() {
    let app = test_app_with_auth();
    let token = token_for(&app, "billing").await;
    let customer = create_customer(&app, &token, "Ravi", "9876500001").await;
    let id = customer.id.to_string();

    let first = create_bill(&app, &token, &id, 2500.0).await;
    let second = create_bill(&app, &token, &id, 1200.0).await;
    assert_eq!(first.bill_number, 1001);
    assert_eq!(second.bill_number, 1002);
    assert_eq!(first.customer_name, "Ravi");
    assert_eq!(first.status, BillStatus::Pending);

    let uri = format!("/api/bills/{}/status", second.id);
    let body = json!({ "status": "delivered" }).to_string();
    let (status, _) = put_json_with_auth(&app, &uri, &body, &token).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_with_auth(&app, "/api/bills?status=pending", &token).await;
    let pending: Vec<Bill> = serde_json::from_str(&body).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, first.id);

    // Delivered bills are closed.
    let body = json!({ "status": "pending" }).to_string();
    let (status, _) = put_json_with_auth(&app, &uri, &body, &token).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bill_for_unknown_customer_is_not_found() {
    let app = test_app_with_auth();
    let token = token_for(&app, "billing").await;
    let body = json!({
        "customer_id": uuid::Uuid::new_v4(),
        "items": [{ "kind": "shirt", "description": "", "quantity": 1, "price": 500.0 }],
        "subtotal": 500.0,
        "total": 500.0
    });
    let (status, _) = post_json_with_auth(&app, "/api/bills", &body.to_string(), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Tailors and jobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tailor_roster_management() {
    let app = test_app_with_auth();
    let admin = token_for(&app, "admin").await;

    let body = json!({ "name": "Suresh", "phone": "9000000002", "specialization": "Sherwani" });
    let (status, body) = post_json_with_auth(&app, "/api/tailors", &body.to_string(), &admin).await;
    assert_eq!(status, StatusCode::CREATED);
    let suresh: Tailor = serde_json::from_str(&body).unwrap();

    let uri = format!("/api/tailors/{}/status", suresh.id);
    let (status, body) =
        put_json_with_auth(&app, &uri, &json!({ "status": "inactive" }).to_string(), &admin).await;
    assert_eq!(status, StatusCode::OK);
    let suresh: Tailor = serde_json::from_str(&body).unwrap();
    assert_eq!(suresh.status, shared_types::TailorStatus::Inactive);

    let (status, _) =
        delete_with_auth(&app, &format!("/api/tailors/{}", suresh.id), &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get_with_auth(&app, "/api/tailors", &admin).await;
    let tailors: Vec<Tailor> = serde_json::from_str(&body).unwrap();
    assert_eq!(tailors.len(), 1);
}

#[tokio::test]
async fn tailor_sees_and_advances_only_their_jobs() {
    let app = test_app_with_auth();
    let admin = token_for(&app, "admin").await;
    let tailor_token = token_for(&app, "tailor").await;

    let customer = create_customer(&app, &admin, "Ravi", "9876500001").await;
    let bill = create_bill(&app, &admin, &customer.id.to_string(), 3000.0).await;
    let master = demo_tailor(&app, &admin).await;

    let other = json!({ "name": "Suresh", "phone": "9000000002" });
    let (_, body) = post_json_with_auth(&app, "/api/tailors", &other.to_string(), &admin).await;
    let suresh: Tailor = serde_json::from_str(&body).unwrap();

    let mut jobs = Vec::new();
    for tailor_id in [master.id, suresh.id] {
        let body = json!({ "bill_id": bill.id, "tailor_id": tailor_id, "priority": "high" });
        let (status, body) =
            post_json_with_auth(&app, "/api/jobs", &body.to_string(), &admin).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        jobs.push(serde_json::from_str::<Job>(&body).unwrap());
    }
    assert_eq!(jobs[0].due_date.as_deref(), Some("2026-11-01"));

    let (_, body) = get_with_auth(&app, "/api/jobs", &tailor_token).await;
    let visible: Vec<Job> = serde_json::from_str(&body).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].tailor_id, master.id);

    let (_, body) = get_with_auth(&app, "/api/jobs", &admin).await;
    let all: Vec<Job> = serde_json::from_str(&body).unwrap();
    assert_eq!(all.len(), 2);

    let in_progress = json!({ "status": "in_progress" }).to_string();
    let mine = format!("/api/jobs/{}/status", jobs[0].id);
    let (status, body) = put_json_with_auth(&app, &mine, &in_progress, &tailor_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Job>(&body).unwrap().status, JobStatus::InProgress);

    let theirs = format!("/api/jobs/{}/status", jobs[1].id);
    let (status, _) = put_json_with_auth(&app, &theirs, &in_progress, &tailor_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Jobs move one step at a time.
    let completed = json!({ "status": "completed" }).to_string();
    let (status, _) = put_json_with_auth(&app, &theirs, &completed, &admin).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Tailors cannot assign work.
    let body = json!({ "bill_id": bill.id, "tailor_id": master.id }).to_string();
    let (status, _) = post_json_with_auth(&app, "/api/jobs", &body, &tailor_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn tailor_with_open_jobs_cannot_be_removed() {
    let app = test_app_with_auth();
    let admin = token_for(&app, "admin").await;
    let customer = create_customer(&app, &admin, "Ravi", "9876500001").await;
    let bill = create_bill(&app, &admin, &customer.id.to_string(), 800.0).await;
    let master = demo_tailor(&app, &admin).await;

    let body = json!({ "bill_id": bill.id, "tailor_id": master.id }).to_string();
    let (status, _) = post_json_with_auth(&app, "/api/jobs", &body, &admin).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) =
        delete_with_auth(&app, &format!("/api/tailors/{}", master.id), &admin).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_counts_shop_activity() {
    let app = test_app_with_auth();
    let admin = token_for(&app, "admin").await;
    let customer = create_customer(&app, &admin, "Ravi", "9876500001").await;
    let id = customer.id.to_string();
    create_bill(&app, &admin, &id, 2000.0).await;
    let cancelled = create_bill(&app, &admin, &id, 700.0).await;

    let uri = format!("/api/bills/{}/status", cancelled.id);
    let body = json!({ "status": "cancelled" }).to_string();
    put_json_with_auth(&app, &uri, &body, &admin).await;

    let (status, body) = get_with_auth(&app, "/api/dashboard/stats", &admin).await;
    assert_eq!(status, StatusCode::OK);
    let stats: DashboardStats = serde_json::from_str(&body).unwrap();
    assert_eq!(stats.total_customers, 1);
    assert_eq!(stats.total_bills, 2);
    assert_eq!(stats.today_bills, 2);
    assert_eq!(stats.total_tailors, 1);
    assert_eq!(stats.total_revenue, 2000.0);
}
