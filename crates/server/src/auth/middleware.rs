use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::validate_access_token;
use crate::state::AppState;

/// Permissive auth middleware that handles authentication and cookie management.
///
/// On each request:
/// 1. Validates the access token from cookies (or Bearer header fallback)
/// 2. If missing or invalid, attempts transparent refresh using the refresh cookie
/// 3. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 4. After the handler runs, applies any pending cookie actions to the response
///
/// Never rejects a request; extractors and server functions decide access.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers().clone();
    let mut refreshed = None;

    let claims = cookies::extract_access_token(&headers)
        .and_then(|token| validate_access_token(&token).ok());

    match claims {
        Some(claims) => {
            req.extensions_mut().insert(claims);
        }
        None => {
            if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
                if let Some((claims, tokens)) =
                    super::rotate_refresh_token(&state, &refresh_token)
                {
                    req.extensions_mut().insert(claims);
                    refreshed = Some(tokens);
                }
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some(tokens) = refreshed {
        cookies::set_auth_cookies(
            response.headers_mut(),
            &tokens.access_token,
            &tokens.refresh_token,
        );
    }

    // A scheduled action is appended last, so it wins over a refresh.
    if let Some(action) = cookie_slot.take() {
        match action {
            PendingCookieAction::Set {
                access_token,
                refresh_token,
            } => {
                cookies::set_auth_cookies(response.headers_mut(), &access_token, &refresh_token);
            }
            PendingCookieAction::Clear => {
                cookies::clear_auth_cookies(response.headers_mut());
            }
        }
    }

    response
}
