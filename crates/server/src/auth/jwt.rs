use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{AuthUser, Role};
use uuid::Uuid;

/// Token type discriminator. A refresh token is never accepted as an access token.
const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims stored in access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    /// Stored as text so a token minted with a role this build does not know
    /// still decodes; `role()` turns it into "no role".
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique per token, so two tokens issued in the same second hash differently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default)]
    pub typ: String,
}

impl Claims {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// SHA-256 of a raw JWT, hex-encoded. Only this hash is kept server-side.
pub fn hash_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn jwt_secret() -> Result<String, JwtError> {
    std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ErrorKind::InvalidKeyFormat.into())
}

pub fn access_token_expiry_minutes() -> i64 {
    std::env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(15)
}

pub fn refresh_token_expiry_days() -> i64 {
    std::env::var("JWT_REFRESH_TOKEN_EXPIRY_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(7)
}

fn sign(claims: &Claims) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_secret()?.as_bytes()),
    )
}

fn decode_claims(token: &str) -> Result<Claims, JwtError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret()?.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

pub fn create_access_token(user: &AuthUser) -> Result<String, JwtError> {
    let now = Utc::now();
    sign(&Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.as_str().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(access_token_expiry_minutes())).timestamp(),
        jti: Some(Uuid::new_v4().to_string()),
        typ: TOKEN_TYPE_ACCESS.to_string(),
    })
}

/// Returns the token and its expiry.
pub fn create_refresh_token(
    user: &AuthUser,
) -> Result<(String, chrono::DateTime<Utc>), JwtError> {
    let now = Utc::now();
    let expires_at = now + Duration::days(refresh_token_expiry_days());
    let token = sign(&Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.as_str().to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        jti: Some(Uuid::new_v4().to_string()),
        typ: TOKEN_TYPE_REFRESH.to_string(),
    })?;
    Ok((token, expires_at))
}

/// Validate an access token. Tokens typed `refresh` are rejected.
pub fn validate_access_token(token: &str) -> Result<Claims, JwtError> {
    let claims = decode_claims(token)?;
    if claims.typ != TOKEN_TYPE_ACCESS {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

/// Validate a refresh token. Anything not typed `refresh` is rejected.
pub fn validate_refresh_token(token: &str) -> Result<Claims, JwtError> {
    let claims = decode_claims(token)?;
    if claims.typ != TOKEN_TYPE_REFRESH {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_secret() {
        std::env::set_var("JWT_SECRET", "test-secret-key-for-jwt-unit-tests");
    }

    fn user(role: Role) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            username: role.as_str().to_string(),
            display_name: role.display_name().to_string(),
            role,
        }
    }

    #[test]
    fn create_and_validate_access_token() {
        setup_test_secret();
        let u = user(Role::Billing);
        let token = create_access_token(&u).unwrap();
        let claims = validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, u.id);
        assert_eq!(claims.username, "billing");
        assert_eq!(claims.role(), Some(Role::Billing));
        assert_eq!(claims.typ, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_rejected() {
        setup_test_secret();
        let now = Utc::now();
        let token = sign(&Claims {
            sub: Uuid::new_v4(),
            username: "expired".to_string(),
            role: "admin".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: None,
            typ: TOKEN_TYPE_ACCESS.to_string(),
        })
        .unwrap();
        assert!(validate_access_token(&token).is_err());
    }

    #[test]
    fn invalid_token_rejected() {
        setup_test_secret();
        assert!(validate_access_token("not.a.valid.jwt").is_err());
        assert!(validate_access_token("").is_err());
    }

    #[test]
    fn unknown_role_in_token_means_no_role() {
        setup_test_secret();
        let now = Utc::now();
        let token = sign(&Claims {
            sub: Uuid::new_v4(),
            username: "ghost".to_string(),
            role: "manager".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(5)).timestamp(),
            jti: None,
            typ: TOKEN_TYPE_ACCESS.to_string(),
        })
        .unwrap();
        let claims = validate_access_token(&token).unwrap();
        assert_eq!(claims.role(), None);
    }

    #[test]
    fn refresh_token_has_later_expiry() {
        setup_test_secret();
        let u = user(Role::Tailor);
        let access = create_access_token(&u).unwrap();
        let (refresh, _) = create_refresh_token(&u).unwrap();
        let access_claims = validate_access_token(&access).unwrap();
        let refresh_claims = validate_refresh_token(&refresh).unwrap();
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn token_types_are_not_interchangeable() {
        setup_test_secret();
        let u = user(Role::Admin);
        let access = create_access_token(&u).unwrap();
        let (refresh, _) = create_refresh_token(&u).unwrap();
        assert!(validate_access_token(&refresh).is_err());
        assert!(validate_refresh_token(&access).is_err());
    }

    #[test]
    fn hash_token_produces_consistent_hex() {
        let hash1 = hash_token("eyJhbGciOiJIUzI1NiJ9.test-payload.signature");
        let hash2 = hash_token("eyJhbGciOiJIUzI1NiJ9.test-payload.signature");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert!(hash1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash1, hash_token("token-bbb"));
    }
}
