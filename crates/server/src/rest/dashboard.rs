use axum::{extract::State, Json};
use std::sync::Arc;

use shared_types::{AppError, BusinessSettings, DashboardStats, UpiSettings};

use crate::auth::extractors::{AdminOnly, AuthRequired};
use crate::error_convert::ValidateRequest;
use crate::store::ShopStore;

// ── Dashboard ──────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard_stats(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(shop.dashboard_stats()))
}

// ── Settings ───────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/settings/business",
    responses(
        (status = 200, description = "Business details", body = BusinessSettings),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn get_business_settings(
    State(shop): State<Arc<ShopStore>>,
    _auth: AuthRequired,
) -> Json<BusinessSettings> {
    Json(shop.business_settings())
}

#[utoipa::path(
    put,
    path = "/api/settings/business",
    request_body = BusinessSettings,
    responses(
        (status = 200, description = "Business details saved", body = BusinessSettings),
        (status = 403, description = "Admin role required", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn update_business_settings(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
    Json(body): Json<BusinessSettings>,
) -> Result<Json<BusinessSettings>, AppError> {
    body.validate_request()?;
    Ok(Json(shop.set_business_settings(body)))
}

#[utoipa::path(
    get,
    path = "/api/settings/upi",
    responses(
        (status = 200, description = "UPI payment details", body = UpiSettings),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn get_upi_settings(
    State(shop): State<Arc<ShopStore>>,
    _auth: AuthRequired,
) -> Json<UpiSettings> {
    Json(shop.upi_settings())
}

#[utoipa::path(
    put,
    path = "/api/settings/upi",
    request_body = UpiSettings,
    responses(
        (status = 200, description = "UPI payment details saved", body = UpiSettings),
        (status = 403, description = "Admin role required", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "settings",
    security(("bearer_auth" = []))
)]
pub async fn update_upi_settings(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
    Json(body): Json<UpiSettings>,
) -> Result<Json<UpiSettings>, AppError> {
    body.validate_request()?;
    Ok(Json(shop.set_upi_settings(body)))
}
