use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, CreateJobRequest, Job, JobQuery, Role, UpdateJobStatusRequest};
use uuid::Uuid;

use super::parse_id;
use crate::auth::extractors::{AdminOnly, JobAccess};
use crate::state::AppState;

/// Tailors only ever see their own jobs. A tailor login with no linked
/// tailor record has no jobs at all.
pub(crate) fn tailor_scope(
    state: &AppState,
    role: Role,
    username: &str,
) -> Result<Option<Uuid>, AppError> {
    if role != Role::Tailor {
        return Ok(None);
    }
    state
        .shop
        .tailor_for_username(username)
        .map(|t| Some(t.id))
        .ok_or_else(|| AppError::forbidden("No tailor profile is linked to this account"))
}

// ---------------------------------------------------------------------------
// GET /api/jobs
// ---------------------------------------------------------------------------

/// List jobs, newest first. Tailors get only the jobs assigned to them.
#[utoipa::path(
    get,
    path = "/api/jobs",
    params(JobQuery),
    responses(
        (status = 200, description = "Job list", body = Vec<Job>),
        (status = 403, description = "Admin or tailor role required", body = AppError)
    ),
    tag = "jobs",
    security(("bearer_auth" = []))
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    auth: JobAccess,
    Query(query): Query<JobQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let scope = tailor_scope(&state, auth.role, &auth.claims.username)?;
    Ok(Json(state.shop.list_jobs(&query, scope)))
}

// ---------------------------------------------------------------------------
// POST /api/jobs
// ---------------------------------------------------------------------------

/// Assign a bill to a tailor.
#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 404, description = "Bill or tailor not found", body = AppError),
        (status = 422, description = "Tailor inactive", body = AppError)
    ),
    tag = "jobs",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, _auth, body))]
pub async fn create_job(
    State(state): State<AppState>,
    _auth: AdminOnly,
    Json(body): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = state.shop.create_job(body)?;
    tracing::info!(job_id = %job.id, tailor = %job.tailor_name, "Job assigned");
    Ok((StatusCode::CREATED, Json(job)))
}

// ---------------------------------------------------------------------------
// PUT /api/jobs/{id}/status
// ---------------------------------------------------------------------------

/// Move a job one step forward.
#[utoipa::path(
    put,
    path = "/api/jobs/{id}/status",
    params(("id" = String, Path, description = "Job UUID")),
    request_body = UpdateJobStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Job),
        (status = 403, description = "Job belongs to another tailor", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Not the next step", body = AppError)
    ),
    tag = "jobs",
    security(("bearer_auth" = []))
)]
pub async fn update_job_status(
    State(state): State<AppState>,
    auth: JobAccess,
    Path(id): Path<String>,
    Json(body): Json<UpdateJobStatusRequest>,
) -> Result<Json<Job>, AppError> {
    let id = parse_id(&id)?;
    let scope = tailor_scope(&state, auth.role, &auth.claims.username)?;
    state
        .shop
        .update_job_status(id, body.status, scope)
        .map(Json)
}
