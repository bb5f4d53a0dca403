use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use shared_types::{AppError, Tailor, TailorInput, UpdateTailorStatusRequest};

use super::parse_id;
use crate::auth::extractors::AdminOnly;
use crate::error_convert::ValidateRequest;
use crate::store::ShopStore;

// ---------------------------------------------------------------------------
// GET /api/tailors
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/tailors",
    responses(
        (status = 200, description = "Tailors sorted by name", body = Vec<Tailor>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "tailors",
    security(("bearer_auth" = []))
)]
pub async fn list_tailors(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
) -> Result<Json<Vec<Tailor>>, AppError> {
    Ok(Json(shop.list_tailors()))
}

// ---------------------------------------------------------------------------
// POST /api/tailors
// ---------------------------------------------------------------------------

/// Add a tailor. `username` links the record to a tailor sign-in account.
#[utoipa::path(
    post,
    path = "/api/tailors",
    request_body = TailorInput,
    responses(
        (status = 201, description = "Tailor created", body = Tailor),
        (status = 409, description = "Account already linked", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "tailors",
    security(("bearer_auth" = []))
)]
pub async fn create_tailor(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
    Json(body): Json<TailorInput>,
) -> Result<(StatusCode, Json<Tailor>), AppError> {
    body.validate_request()?;
    let tailor = shop.create_tailor(body)?;
    Ok((StatusCode::CREATED, Json(tailor)))
}

// ---------------------------------------------------------------------------
// GET /api/tailors/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/tailors/{id}",
    params(("id" = String, Path, description = "Tailor UUID")),
    responses(
        (status = 200, description = "Tailor found", body = Tailor),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "tailors",
    security(("bearer_auth" = []))
)]
pub async fn get_tailor(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
    Path(id): Path<String>,
) -> Result<Json<Tailor>, AppError> {
    shop.get_tailor(parse_id(&id)?).map(Json)
}

// ---------------------------------------------------------------------------
// PUT /api/tailors/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/tailors/{id}",
    params(("id" = String, Path, description = "Tailor UUID")),
    request_body = TailorInput,
    responses(
        (status = 200, description = "Tailor updated", body = Tailor),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "tailors",
    security(("bearer_auth" = []))
)]
pub async fn update_tailor(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
    Path(id): Path<String>,
    Json(body): Json<TailorInput>,
) -> Result<Json<Tailor>, AppError> {
    let id = parse_id(&id)?;
    body.validate_request()?;
    shop.update_tailor(id, body).map(Json)
}

// ---------------------------------------------------------------------------
// PUT /api/tailors/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/tailors/{id}/status",
    params(("id" = String, Path, description = "Tailor UUID")),
    request_body = UpdateTailorStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Tailor),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "tailors",
    security(("bearer_auth" = []))
)]
pub async fn update_tailor_status(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
    Path(id): Path<String>,
    Json(body): Json<UpdateTailorStatusRequest>,
) -> Result<Json<Tailor>, AppError> {
    shop.set_tailor_status(parse_id(&id)?, body.status).map(Json)
}

// ---------------------------------------------------------------------------
// DELETE /api/tailors/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/tailors/{id}",
    params(("id" = String, Path, description = "Tailor UUID")),
    responses(
        (status = 204, description = "Tailor deleted"),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Tailor has unfinished jobs", body = AppError)
    ),
    tag = "tailors",
    security(("bearer_auth" = []))
)]
pub async fn delete_tailor(
    State(shop): State<Arc<ShopStore>>,
    _auth: AdminOnly,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    shop.delete_tailor(parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}
