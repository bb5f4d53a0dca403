use dioxus::prelude::*;
use shared_types::{
    AuthUser, Bill, BillStatus, CreateBillRequest, CreateJobRequest, Customer, CustomerInput,
    DashboardStats, FeatureFlags, Job, Tailor, TailorInput, UpiSettings,
};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use crate::state::shared_state;

#[cfg(feature = "server")]
use shared_types::{AppError, Page, Role, RoleSet};

// ── Auth helpers for server functions ──────────────────

/// Caller identity for the current request.
/// Checks middleware-injected Claims first, falls back to cookie parsing.
#[cfg(feature = "server")]
fn require_auth() -> Result<crate::auth::jwt::Claims, ServerFnError> {
    use crate::auth::{cookies, jwt};

    let ctx = dioxus::fullstack::FullstackContext::current()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())?;

    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Ok(claims.clone());
    }

    let token = cookies::extract_access_token(&parts.headers)
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())?;

    jwt::validate_access_token(&token)
        .map_err(|_| AppError::unauthorized("Invalid or expired token").into_server_fn_error())
}

/// Require a signed-in caller whose role is in `allowed`.
#[cfg(feature = "server")]
fn require_roles(allowed: RoleSet) -> Result<(crate::auth::jwt::Claims, Role), ServerFnError> {
    let claims = require_auth()?;
    let role = crate::auth::extractors::authorize(&claims, allowed)
        .map_err(|e| e.into_server_fn_error())?;
    Ok((claims, role))
}

/// Get the current feature flags. No auth required.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

// ── Session ────────────────────────────────────────────

/// Sign in with username and password. Sets HTTP-only auth cookies on success.
/// The client sends the user to `user.role.landing_path()`.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(username: String, password: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{cookies, issue_tokens};
    use shared_types::LoginRequest;

    let req = LoginRequest { username, password };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let state = shared_state();
    let user = state
        .users
        .authenticate(&req.username, &req.password)
        .map_err(|e| e.into_server_fn_error())?;
    let tokens = issue_tokens(state, &user).map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_auth_cookies(&tokens.access_token, &tokens.refresh_token);
    tracing::info!(user_id = %user.id, role = %user.role, "User signed in");

    Ok(user)
}

/// The signed-in user, or `None` when nobody is signed in.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    let Ok(claims) = require_auth() else {
        return Ok(None);
    };

    match shared_state().users.find_by_id(claims.sub) {
        Some(user) => Ok(Some(user)),
        None => {
            // Stale cookies for an account that is gone: clear them so the
            // client does not stay half signed in.
            crate::auth::cookies::schedule_clear_cookies();
            tracing::warn!(user_id = %claims.sub, "Token references unknown account, clearing cookies");
            Ok(None)
        }
    }
}

/// Revoke every refresh token of the caller and clear the auth cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    if let Ok(claims) = require_auth() {
        let revoked = shared_state().refresh_tokens.revoke_all(claims.sub);
        tracing::info!(user_id = %claims.sub, revoked, "User signed out");
    }
    crate::auth::cookies::schedule_clear_cookies();
    Ok(())
}

// ── Customers ──────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_customers(search: Option<String>) -> Result<Vec<Customer>, ServerFnError> {
    require_roles(Page::Customers.allowed_roles())?;
    Ok(shared_state().shop.list_customers(search.as_deref()))
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn create_customer(input: CustomerInput) -> Result<Customer, ServerFnError> {
    require_roles(Page::Customers.allowed_roles())?;
    input
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    shared_state()
        .shop
        .create_customer(input)
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_customer(customer_id: Uuid) -> Result<(), ServerFnError> {
    require_roles(Page::Customers.allowed_roles())?;
    shared_state()
        .shop
        .delete_customer(customer_id)
        .map_err(|e| e.into_server_fn_error())
}

// ── Bills ──────────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_bills(status: Option<BillStatus>) -> Result<Vec<Bill>, ServerFnError> {
    require_roles(Page::Billing.allowed_roles())?;
    let query = shared_types::BillQuery {
        status,
        customer_id: None,
    };
    Ok(shared_state().shop.list_bills(&query))
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn create_bill(req: CreateBillRequest) -> Result<Bill, ServerFnError> {
    require_roles(Page::Billing.allowed_roles())?;
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    shared_state()
        .shop
        .create_bill(req)
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_bill_status(bill_id: Uuid, status: BillStatus) -> Result<Bill, ServerFnError> {
    require_roles(Page::Billing.allowed_roles())?;
    shared_state()
        .shop
        .update_bill_status(bill_id, status)
        .map_err(|e| e.into_server_fn_error())
}

/// UPI details printed on bills. Any signed-in user may read them.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_upi_settings() -> Result<UpiSettings, ServerFnError> {
    require_auth()?;
    Ok(shared_state().shop.upi_settings())
}

// ── Tailors ────────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_tailors() -> Result<Vec<Tailor>, ServerFnError> {
    require_roles(Page::Tailors.allowed_roles())?;
    Ok(shared_state().shop.list_tailors())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(input)))]
#[server]
pub async fn create_tailor(input: TailorInput) -> Result<Tailor, ServerFnError> {
    require_roles(Page::Tailors.allowed_roles())?;
    input
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    shared_state()
        .shop
        .create_tailor(input)
        .map_err(|e| e.into_server_fn_error())
}

/// Flip a tailor between active and inactive.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn toggle_tailor_status(tailor_id: Uuid) -> Result<Tailor, ServerFnError> {
    require_roles(Page::Tailors.allowed_roles())?;
    let shop = &shared_state().shop;
    let tailor = shop
        .get_tailor(tailor_id)
        .map_err(|e| e.into_server_fn_error())?;
    shop.set_tailor_status(tailor_id, tailor.status.toggled())
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_tailor(tailor_id: Uuid) -> Result<(), ServerFnError> {
    require_roles(Page::Tailors.allowed_roles())?;
    shared_state()
        .shop
        .delete_tailor(tailor_id)
        .map_err(|e| e.into_server_fn_error())
}

// ── Jobs ───────────────────────────────────────────────

/// Admins see every job; tailors only their own.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_jobs() -> Result<Vec<Job>, ServerFnError> {
    let (claims, role) = require_roles(RoleSet::of(&[Role::Admin, Role::Tailor]))?;
    let state = shared_state();
    let scope = crate::rest::job::tailor_scope(state, role, &claims.username)
        .map_err(|e| e.into_server_fn_error())?;
    Ok(state.shop.list_jobs(&Default::default(), scope))
}

/// Assign a bill to a tailor. Admin only.
#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn create_job(req: CreateJobRequest) -> Result<Job, ServerFnError> {
    require_roles(Page::AdminDashboard.allowed_roles())?;
    shared_state()
        .shop
        .create_job(req)
        .map_err(|e| e.into_server_fn_error())
}

/// Move a job to its next status.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn advance_job(job_id: Uuid) -> Result<Job, ServerFnError> {
    let (claims, role) = require_roles(RoleSet::of(&[Role::Admin, Role::Tailor]))?;
    let state = shared_state();
    let scope = crate::rest::job::tailor_scope(state, role, &claims.username)
        .map_err(|e| e.into_server_fn_error())?;

    let current = state
        .shop
        .list_jobs(&Default::default(), scope)
        .into_iter()
        .find(|j| j.id == job_id)
        .ok_or_else(|| AppError::not_found(format!("Job {job_id} not found")).into_server_fn_error())?;
    let next = current.status.next().ok_or_else(|| {
        AppError::invalid_field("status", "This job is already completed").into_server_fn_error()
    })?;

    state
        .shop
        .update_job_status(job_id, next, scope)
        .map_err(|e| e.into_server_fn_error())
}

// ── Dashboard ──────────────────────────────────────────

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_dashboard_stats() -> Result<DashboardStats, ServerFnError> {
    require_roles(Page::AdminDashboard.allowed_roles())?;
    Ok(shared_state().shop.dashboard_stats())
}
