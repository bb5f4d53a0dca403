use dioxus::prelude::*;
use shared_types::{AuthUser, Role};

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new(user: Option<AuthUser>) -> Self {
        Self {
            current_user: Signal::new(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    /// Role of the signed-in user; `None` when signed out.
    pub fn role(&self) -> Option<Role> {
        self.current_user.read().as_ref().map(|u| u.role)
    }

    pub fn display_name(&self) -> Option<String> {
        self.current_user
            .read()
            .as_ref()
            .map(|u| u.display_name.clone())
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}
