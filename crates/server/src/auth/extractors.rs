use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{AppError, Page, Role, RoleSet};

use super::jwt::Claims;

/// Check that the token's role is in `allowed`.
///
/// A role this build does not recognise counts as no role and is refused.
pub fn authorize(claims: &Claims, allowed: RoleSet) -> Result<Role, AppError> {
    match claims.role() {
        Some(role) if allowed.contains(role) => Ok(role),
        Some(role) => Err(AppError::forbidden(format!(
            "{} accounts cannot access this resource",
            role.display_name()
        ))),
        None => Err(AppError::forbidden("Your account has no recognised role")),
    }
}

fn claims_from(parts: &Parts) -> Result<Claims, AppError> {
    parts
        .extensions
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))
}

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims_from(parts).map(AuthRequired)
    }
}

/// Extractor that optionally extracts auth claims. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Extractor that requires authentication AND a role inside the bit set `ROLES`
/// (see `RoleSet::bits`). 401 when unauthenticated, 403 when the role is outside the set.
pub struct RolesRequired<const ROLES: u8> {
    pub claims: Claims,
    pub role: Role,
}

impl<const ROLES: u8, S: Send + Sync> FromRequestParts<S> for RolesRequired<ROLES> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = claims_from(parts)?;
        let role = authorize(&claims, RoleSet::from_bits(ROLES))?;
        Ok(RolesRequired { claims, role })
    }
}

/// Endpoints gated like the admin dashboard, tailors and reports pages.
pub type AdminOnly = RolesRequired<{ Page::AdminDashboard.allowed_roles().bits() }>;

/// Endpoints gated like the customers and billing pages.
pub type FrontDesk = RolesRequired<{ Page::Billing.allowed_roles().bits() }>;

/// Job endpoints: admins manage every job, tailors their own.
pub type JobAccess = RolesRequired<{ RoleSet::of(&[Role::Admin, Role::Tailor]).bits() }>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;
    use uuid::Uuid;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            username: "someone".to_string(),
            role: role.to_string(),
            exp: 0,
            iat: 0,
            jti: None,
            typ: "access".to_string(),
        }
    }

    #[test]
    fn role_inside_set_is_authorized() {
        let allowed = Page::Billing.allowed_roles();
        assert_eq!(authorize(&claims("billing"), allowed), Ok(Role::Billing));
        assert_eq!(authorize(&claims("admin"), allowed), Ok(Role::Admin));
    }

    #[test]
    fn role_outside_set_is_forbidden() {
        let err = authorize(&claims("tailor"), Page::Billing.allowed_roles()).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
    }

    #[test]
    fn unknown_role_is_forbidden() {
        let err = authorize(&claims("manager"), Page::TailorJobs.allowed_roles()).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn extractor_rejects_missing_claims_with_401() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let err = match AdminOnly::from_request_parts(&mut parts, &()).await {
            Err(e) => e,
            Ok(_) => panic!("expected rejection"),
        };
        assert_eq!(err.kind, AppErrorKind::Unauthorized);

        parts.extensions.insert(claims("tailor"));
        let err = match AdminOnly::from_request_parts(&mut parts, &()).await {
            Err(e) => e,
            Ok(_) => panic!("expected rejection"),
        };
        assert_eq!(err.kind, AppErrorKind::Forbidden);

        let ok = JobAccess::from_request_parts(&mut parts, &()).await;
        assert!(matches!(ok, Ok(RolesRequired { role: Role::Tailor, .. })));
    }
}
