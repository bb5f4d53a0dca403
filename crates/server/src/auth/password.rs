use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use shared_types::AppError;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// A stored hash that fails to parse never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_succeeds() {
        let hash = hash_password("tailor123").unwrap();
        assert!(verify_password("tailor123", &hash));
        assert!(!verify_password("tailor124", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("billing123").unwrap();
        let b = hash_password("billing123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("billing123", &a));
        assert!(verify_password("billing123", &b));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("admin123", "not-a-phc-string"));
    }
}
