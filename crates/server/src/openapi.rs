use axum::Router;
use shared_types::{
    AppError, AppErrorKind, AuthUser, Bill, BillItem, BillStatus, BusinessSettings,
    CreateBillRequest, CreateJobRequest, Customer, CustomerInput, DashboardStats, Job,
    JobPriority, JobStatus, LoginRequest, LoginResponse, Role, Tailor, TailorInput, TailorStatus,
    UpdateBillStatusRequest, UpdateJobStatusRequest, UpdateTailorStatusRequest, UpiSettings,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health::{self, HealthResponse};
use crate::rest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::auth::login,
        rest::auth::logout,
        rest::auth::me,
        rest::customer::list_customers,
        rest::customer::create_customer,
        rest::customer::get_customer,
        rest::customer::update_customer,
        rest::customer::delete_customer,
        rest::bill::list_bills,
        rest::bill::create_bill,
        rest::bill::get_bill,
        rest::bill::update_bill_status,
        rest::tailor::list_tailors,
        rest::tailor::create_tailor,
        rest::tailor::get_tailor,
        rest::tailor::update_tailor,
        rest::tailor::update_tailor_status,
        rest::tailor::delete_tailor,
        rest::job::list_jobs,
        rest::job::create_job,
        rest::job::update_job_status,
        rest::dashboard::get_dashboard_stats,
        rest::dashboard::get_business_settings,
        rest::dashboard::update_business_settings,
        rest::dashboard::get_upi_settings,
        rest::dashboard::update_upi_settings,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, AuthUser, Role, LoginRequest, LoginResponse,
        Customer, CustomerInput,
        Bill, BillItem, BillStatus, CreateBillRequest, UpdateBillStatusRequest,
        Tailor, TailorInput, TailorStatus, UpdateTailorStatusRequest,
        Job, JobPriority, JobStatus, CreateJobRequest, UpdateJobStatusRequest,
        DashboardStats, BusinessSettings, UpiSettings,
        HealthResponse,
    )),
    tags(
        (name = "auth", description = "Sign-in and session endpoints"),
        (name = "customers", description = "Customer records"),
        (name = "bills", description = "Tailoring bills"),
        (name = "tailors", description = "Tailor roster"),
        (name = "jobs", description = "Work assigned to tailors"),
        (name = "dashboard", description = "Shop statistics"),
        (name = "settings", description = "Business and UPI payment details"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "STAR TAILORS API",
        description = "Tailoring shop management API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// REST API, health check and the API docs at `/docs`, all sharing `state`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/customers/{id}",
            "/api/bills/{id}/status",
            "/api/tailors/{id}/status",
            "/api/jobs",
            "/api/dashboard/stats",
            "/api/settings/upi",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
