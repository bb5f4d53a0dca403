use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use shared_types::{AppError, Bill, BillQuery, CreateBillRequest, UpdateBillStatusRequest};

use super::parse_id;
use crate::auth::extractors::FrontDesk;
use crate::error_convert::ValidateRequest;
use crate::store::ShopStore;

// ---------------------------------------------------------------------------
// GET /api/bills
// ---------------------------------------------------------------------------

/// List bills, newest first.
#[utoipa::path(
    get,
    path = "/api/bills",
    params(BillQuery),
    responses(
        (status = 200, description = "Bill list", body = Vec<Bill>),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Admin or billing role required", body = AppError)
    ),
    tag = "bills",
    security(("bearer_auth" = []))
)]
pub async fn list_bills(
    State(shop): State<Arc<ShopStore>>,
    _auth: FrontDesk,
    Query(query): Query<BillQuery>,
) -> Result<Json<Vec<Bill>>, AppError> {
    Ok(Json(shop.list_bills(&query)))
}

// ---------------------------------------------------------------------------
// POST /api/bills
// ---------------------------------------------------------------------------

/// Record a bill. Amounts are stored exactly as submitted.
#[utoipa::path(
    post,
    path = "/api/bills",
    request_body = CreateBillRequest,
    responses(
        (status = 201, description = "Bill created", body = Bill),
        (status = 404, description = "Customer not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "bills",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(shop, auth, body))]
pub async fn create_bill(
    State(shop): State<Arc<ShopStore>>,
    auth: FrontDesk,
    Json(body): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<Bill>), AppError> {
    body.validate_request()?;
    let bill = shop.create_bill(body)?;
    tracing::info!(
        bill_number = bill.bill_number,
        total = bill.total,
        by = %auth.claims.username,
        "Bill created"
    );
    Ok((StatusCode::CREATED, Json(bill)))
}

// ---------------------------------------------------------------------------
// GET /api/bills/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/bills/{id}",
    params(("id" = String, Path, description = "Bill UUID")),
    responses(
        (status = 200, description = "Bill found", body = Bill),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bills",
    security(("bearer_auth" = []))
)]
pub async fn get_bill(
    State(shop): State<Arc<ShopStore>>,
    _auth: FrontDesk,
    Path(id): Path<String>,
) -> Result<Json<Bill>, AppError> {
    shop.get_bill(parse_id(&id)?).map(Json)
}

// ---------------------------------------------------------------------------
// PUT /api/bills/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/bills/{id}/status",
    params(("id" = String, Path, description = "Bill UUID")),
    request_body = UpdateBillStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Bill),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Bill already delivered or cancelled", body = AppError)
    ),
    tag = "bills",
    security(("bearer_auth" = []))
)]
pub async fn update_bill_status(
    State(shop): State<Arc<ShopStore>>,
    _auth: FrontDesk,
    Path(id): Path<String>,
    Json(body): Json<UpdateBillStatusRequest>,
) -> Result<Json<Bill>, AppError> {
    shop.update_bill_status(parse_id(&id)?, body.status).map(Json)
}
