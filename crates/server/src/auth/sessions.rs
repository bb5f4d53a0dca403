use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

use super::jwt::hash_token;

/// How long a rotated refresh token keeps working. Parallel requests from one
/// page all carry the same refresh cookie when the access token runs out.
pub const ROTATION_GRACE_SECS: i64 = 10;

#[derive(Debug, Clone)]
struct StoredRefresh {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    rotated_at: Option<DateTime<Utc>>,
    revoked: bool,
}

impl StoredRefresh {
    fn usable(&self, user_id: Uuid, now: DateTime<Utc>) -> bool {
        self.user_id == user_id && !self.revoked && self.expires_at > now
    }
}

/// Issued refresh tokens, keyed by SHA-256 hash. Raw tokens are never kept.
#[derive(Debug, Default)]
pub struct RefreshTokenStore {
    tokens: Mutex<HashMap<String, StoredRefresh>>,
}

impl RefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, user_id: Uuid, raw_token: &str, expires_at: DateTime<Utc>) {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();
        tokens.retain(|_, t| t.expires_at > now);
        tokens.insert(
            hash_token(raw_token),
            StoredRefresh {
                user_id,
                expires_at,
                rotated_at: None,
                revoked: false,
            },
        );
    }

    /// True when the token was issued to `user_id`, is unexpired and has
    /// been neither rotated nor revoked.
    pub fn is_active(&self, user_id: Uuid, raw_token: &str) -> bool {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&hash_token(raw_token))
            .is_some_and(|t| t.usable(user_id, Utc::now()) && t.rotated_at.is_none())
    }

    /// Mark one token as rotated. Returns whether it may still be exchanged:
    /// it is active, or it was rotated less than `ROTATION_GRACE_SECS` ago.
    pub fn consume(&self, user_id: Uuid, raw_token: &str) -> bool {
        self.consume_at(user_id, raw_token, Utc::now())
    }

    fn consume_at(&self, user_id: Uuid, raw_token: &str, now: DateTime<Utc>) -> bool {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(t) = tokens.get_mut(&hash_token(raw_token)) else {
            return false;
        };
        if !t.usable(user_id, now) {
            return false;
        }
        match t.rotated_at {
            None => {
                t.rotated_at = Some(now);
                true
            }
            Some(at) => now - at < Duration::seconds(ROTATION_GRACE_SECS),
        }
    }

    /// Revoke every token of a user. Returns how many were active.
    pub fn revoke_all(&self, user_id: Uuid) -> usize {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        let mut active = 0;
        for t in tokens.values_mut().filter(|t| t.user_id == user_id && !t.revoked) {
            if t.rotated_at.is_none() {
                active += 1;
            }
            t.revoked = true;
        }
        active
    }
}
