use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use shared_types::{AppError, Customer, CustomerInput, CustomerQuery};

use super::parse_id;
use crate::auth::extractors::FrontDesk;
use crate::error_convert::ValidateRequest;
use crate::store::ShopStore;

// ---------------------------------------------------------------------------
// GET /api/customers
// ---------------------------------------------------------------------------

/// List customers, newest first, optionally filtered by name or phone.
#[utoipa::path(
    get,
    path = "/api/customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Customer list", body = Vec<Customer>),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Admin or billing role required", body = AppError)
    ),
    tag = "customers",
    security(("bearer_auth" = []))
)]
pub async fn list_customers(
    State(shop): State<Arc<ShopStore>>,
    _auth: FrontDesk,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(shop.list_customers(query.search.as_deref())))
}

// ---------------------------------------------------------------------------
// POST /api/customers
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CustomerInput,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 409, description = "Phone number already registered", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "customers",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(shop, auth, body))]
pub async fn create_customer(
    State(shop): State<Arc<ShopStore>>,
    auth: FrontDesk,
    Json(body): Json<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    body.validate_request()?;
    let customer = shop.create_customer(body)?;
    tracing::info!(customer_id = %customer.id, by = %auth.claims.username, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

// ---------------------------------------------------------------------------
// GET /api/customers/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = String, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "customers",
    security(("bearer_auth" = []))
)]
pub async fn get_customer(
    State(shop): State<Arc<ShopStore>>,
    _auth: FrontDesk,
    Path(id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    shop.get_customer(parse_id(&id)?).map(Json)
}

// ---------------------------------------------------------------------------
// PUT /api/customers/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = String, Path, description = "Customer UUID")),
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "customers",
    security(("bearer_auth" = []))
)]
pub async fn update_customer(
    State(shop): State<Arc<ShopStore>>,
    _auth: FrontDesk,
    Path(id): Path<String>,
    Json(body): Json<CustomerInput>,
) -> Result<Json<Customer>, AppError> {
    let id = parse_id(&id)?;
    body.validate_request()?;
    shop.update_customer(id, body).map(Json)
}

// ---------------------------------------------------------------------------
// DELETE /api/customers/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(("id" = String, Path, description = "Customer UUID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "customers",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(shop, auth))]
pub async fn delete_customer(
    State(shop): State<Arc<ShopStore>>,
    auth: FrontDesk,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    shop.delete_customer(id)?;
    tracing::info!(customer_id = %id, by = %auth.claims.username, "Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
