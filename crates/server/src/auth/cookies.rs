use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};
use std::sync::{Arc, Mutex};

use super::jwt;

pub const ACCESS_COOKIE: &str = "star_access";
pub const REFRESH_COOKIE: &str = "star_refresh";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty())
}

fn auth_cookie(name: &'static str, value: &str, max_age: cookie::time::Duration) -> Option<HeaderValue> {
    let mut builder = Cookie::build((name, value.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        builder = builder.domain(domain);
    }

    // JWTs and empty strings are always valid header text; a failure here
    // means a bad COOKIE_DOMAIN, and the cookie is skipped.
    match HeaderValue::from_str(&builder.build().to_string()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(cookie = name, error = %e, "Dropping unrepresentable Set-Cookie header");
            None
        }
    }
}

/// Set-Cookie value for the access token.
pub fn build_access_cookie(token: &str, max_age_minutes: i64) -> Option<HeaderValue> {
    auth_cookie(
        ACCESS_COOKIE,
        token,
        cookie::time::Duration::seconds(max_age_minutes * 60),
    )
}

/// Set-Cookie value for the refresh token.
pub fn build_refresh_cookie(token: &str, max_age_days: i64) -> Option<HeaderValue> {
    auth_cookie(
        REFRESH_COOKIE,
        token,
        cookie::time::Duration::seconds(max_age_days * 86400),
    )
}

/// Access token from the cookie, falling back to a Bearer header for API clients.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, ACCESS_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, REFRESH_COOKIE)
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

/// Append both auth cookies using the configured token lifetimes.
pub fn set_auth_cookies(headers: &mut HeaderMap, access_token: &str, refresh_token: &str) {
    let cookies = [
        build_access_cookie(access_token, jwt::access_token_expiry_minutes()),
        build_refresh_cookie(refresh_token, jwt::refresh_token_expiry_days()),
    ];
    for value in cookies.into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Append expired, empty copies of both auth cookies.
pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        if let Some(value) = auth_cookie(name, "", cookie::time::Duration::ZERO) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}

/// Cookie change requested by a server function, applied by the middleware
/// once the response exists.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set {
        access_token: String,
        refresh_token: String,
    },
    Clear,
}

/// Shared slot the middleware places in request extensions.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Ask the middleware to set both auth cookies. Called from server functions.
pub fn schedule_auth_cookies(access_token: &str, refresh_token: &str) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    });
}

/// Ask the middleware to clear both auth cookies. Called from server functions.
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = headers_with(header::COOKIE, "theme=dark; star_access=from-cookie");
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_access_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_used_without_cookie() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(extract_access_token(&headers).as_deref(), Some("abc.def.ghi"));
        assert_eq!(extract_refresh_token(&headers), None);
    }

    #[test]
    fn cleared_cookie_value_is_ignored() {
        let headers = headers_with(header::COOKIE, "star_refresh=");
        assert_eq!(extract_refresh_token(&headers), None);
    }

    #[test]
    fn set_cookies_are_http_only() {
        let mut headers = HeaderMap::new();
        set_auth_cookies(&mut headers, "a", "r");
        let values: Vec<_> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(values.len(), 2);
        assert!(values[0].starts_with("star_access=a"));
        assert!(values[1].starts_with("star_refresh=r"));
        assert!(values.iter().all(|v| v.contains("HttpOnly")));
    }

    #[test]
    fn clear_expires_both_cookies() {
        let mut headers = HeaderMap::new();
        clear_auth_cookies(&mut headers);
        let values: Vec<_> = headers.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(values.len(), 2);
        assert!(values
            .iter()
            .all(|v| v.to_str().unwrap().contains("Max-Age=0")));
    }

    #[test]
    fn slot_hands_action_over_once() {
        let slot = CookieSlot::default();
        slot.put(PendingCookieAction::Clear);
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
        assert_eq!(slot.take(), None);
    }
}
