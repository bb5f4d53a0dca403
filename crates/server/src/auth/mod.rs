pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod sessions;

use shared_types::{AppError, AuthUser};

use crate::state::AppState;
use jwt::Claims;

/// Freshly minted access and refresh tokens for one user.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mint a token pair for `user` and remember the refresh token.
pub fn issue_tokens(state: &AppState, user: &AuthUser) -> Result<IssuedTokens, AppError> {
    let access_token = jwt::create_access_token(user)
        .map_err(|e| AppError::internal(format!("Failed to sign access token: {e}")))?;
    let (refresh_token, expires_at) = jwt::create_refresh_token(user)
        .map_err(|e| AppError::internal(format!("Failed to sign refresh token: {e}")))?;
    state
        .refresh_tokens
        .record(user.id, &refresh_token, expires_at);
    Ok(IssuedTokens {
        access_token,
        refresh_token,
    })
}

/// Trade a refresh token for a new pair. The old refresh token stops working
/// once the rotation grace period ends, and the account must still exist.
pub fn rotate_refresh_token(
    state: &AppState,
    refresh_token: &str,
) -> Option<(Claims, IssuedTokens)> {
    let claims = jwt::validate_refresh_token(refresh_token).ok()?;
    if !state.refresh_tokens.consume(claims.sub, refresh_token) {
        return None;
    }
    let user = state.users.find_by_id(claims.sub)?;
    let tokens = issue_tokens(state, &user).ok()?;
    let claims = jwt::validate_access_token(&tokens.access_token).ok()?;
    tracing::debug!(user_id = %user.id, "Rotated refresh token");
    Some((claims, tokens))
}
