use axum::extract::FromRef;
use shared_types::{AppError, FeatureFlags, TailorInput};
use std::sync::{Arc, OnceLock};

use crate::auth::sessions::RefreshTokenStore;
use crate::store::ShopStore;
use crate::users::UserDirectory;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract a single store directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub shop: Arc<ShopStore>,
    pub users: Arc<UserDirectory>,
    pub refresh_tokens: Arc<RefreshTokenStore>,
}

impl AppState {
    /// Empty stores, no accounts.
    pub fn empty() -> Self {
        Self {
            shop: Arc::new(ShopStore::new()),
            users: Arc::new(UserDirectory::new()),
            refresh_tokens: Arc::new(RefreshTokenStore::new()),
        }
    }

    /// Demo accounts plus the tailor record linked to the demo tailor login.
    pub fn with_demo_data() -> Result<Self, AppError> {
        let state = Self {
            users: Arc::new(UserDirectory::with_demo_accounts()?),
            ..Self::empty()
        };
        state.shop.create_tailor(TailorInput {
            name: "Master Tailor".to_string(),
            phone: "9999900001".to_string(),
            specialization: Some("Suits & Sherwanis".to_string()),
            experience: Some("12 years".to_string()),
            username: Some("tailor".to_string()),
            ..Default::default()
        })?;
        Ok(state)
    }

    pub fn from_flags(flags: &FeatureFlags) -> Self {
        if !flags.demo_accounts {
            return Self::empty();
        }
        match Self::with_demo_data() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Failed to seed demo accounts, starting empty");
                Self::empty()
            }
        }
    }
}

static STATE: OnceLock<AppState> = OnceLock::new();

/// Process-wide state, built from the feature flags on first use.
///
/// Server functions reach the stores through this; the REST router is given
/// the same instance in `openapi::api_router`.
pub fn shared_state() -> &'static AppState {
    STATE.get_or_init(|| AppState::from_flags(crate::config::feature_flags()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_tailor_login_has_a_tailor_record() {
        let state = AppState::with_demo_data().unwrap();
        let tailor = state.shop.tailor_for_username("tailor").unwrap();
        assert_eq!(tailor.name, "Master Tailor");
        assert_eq!(state.users.len(), 3);
    }

    #[test]
    fn flags_off_means_no_accounts() {
        let state = AppState::from_flags(&FeatureFlags::default());
        assert!(state.users.is_empty());
        assert!(state.shop.list_tailors().is_empty());
    }
}
