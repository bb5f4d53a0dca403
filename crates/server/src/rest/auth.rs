use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

use shared_types::{AppError, AuthUser, LoginRequest, LoginResponse};

use crate::auth::extractors::AuthRequired;
use crate::auth::{cookies, issue_tokens};
use crate::error_convert::ValidateRequest;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

/// Sign in with username and password.
///
/// Sets the auth cookies and also returns the access token for clients that
/// send a Bearer header. `redirect_to` is the landing page for the user's role.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = AppError),
        (status = 422, description = "Missing username or password", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    payload.validate_request()?;

    let user = state.users.authenticate(&payload.username, &payload.password)?;
    let tokens = issue_tokens(&state, &user)?;

    let mut headers = HeaderMap::new();
    cookies::set_auth_cookies(&mut headers, &tokens.access_token, &tokens.refresh_token);
    tracing::info!(user_id = %user.id, role = %user.role, "User signed in");

    Ok((
        headers,
        Json(LoginResponse {
            redirect_to: user.role.landing_path().to_string(),
            user,
            access_token: tokens.access_token,
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /api/auth/logout
// ---------------------------------------------------------------------------

/// Revoke every refresh token of the caller and clear the auth cookies.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, auth))]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthRequired,
) -> Result<(StatusCode, HeaderMap), AppError> {
    let revoked = state.refresh_tokens.revoke_all(auth.0.sub);
    tracing::info!(user_id = %auth.0.sub, revoked, "User signed out");

    let mut headers = HeaderMap::new();
    cookies::clear_auth_cookies(&mut headers);
    Ok((StatusCode::NO_CONTENT, headers))
}

// ---------------------------------------------------------------------------
// GET /api/auth/me
// ---------------------------------------------------------------------------

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = AuthUser),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    auth: AuthRequired,
) -> Result<Json<AuthUser>, AppError> {
    state
        .users
        .find_by_id(auth.0.sub)
        .map(Json)
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
}
