pub mod auth;
pub mod bill;
pub mod customer;
pub mod dashboard;
pub mod job;
pub mod tailor;

use axum::{
    routing::{get, post, put},
    Router,
};
use shared_types::AppError;
use uuid::Uuid;

use crate::state::AppState;

/// Parse a path id, answering 400 for anything that is not a UUID.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request("Invalid UUID format"))
}

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // Customers
        .route(
            "/api/customers",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/api/customers/{id}",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        // Bills
        .route("/api/bills", get(bill::list_bills).post(bill::create_bill))
        .route("/api/bills/{id}", get(bill::get_bill))
        .route("/api/bills/{id}/status", put(bill::update_bill_status))
        // Tailors
        .route(
            "/api/tailors",
            get(tailor::list_tailors).post(tailor::create_tailor),
        )
        .route(
            "/api/tailors/{id}",
            get(tailor::get_tailor)
                .put(tailor::update_tailor)
                .delete(tailor::delete_tailor),
        )
        .route("/api/tailors/{id}/status", put(tailor::update_tailor_status))
        // Jobs
        .route("/api/jobs", get(job::list_jobs).post(job::create_job))
        .route("/api/jobs/{id}/status", put(job::update_job_status))
        // Dashboard & settings
        .route("/api/dashboard/stats", get(dashboard::get_dashboard_stats))
        .route(
            "/api/settings/business",
            get(dashboard::get_business_settings).put(dashboard::update_business_settings),
        )
        .route(
            "/api/settings/upi",
            get(dashboard::get_upi_settings).put(dashboard::update_upi_settings),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn non_uuid_path_is_bad_request() {
        assert_eq!(
            parse_id("42").unwrap_err().kind,
            AppErrorKind::BadRequest
        );
        assert!(parse_id("7c9e6679-7425-40de-944b-e07fc1f90ae7").is_ok());
    }
}
