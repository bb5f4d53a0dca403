//! Sign-in accounts. Each account carries exactly one role.

use shared_types::{AppError, AuthUser, Role};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

use crate::auth::password;

/// Seeded when the `demo_accounts` flag is on: (username, password, role, display name).
pub const DEMO_ACCOUNTS: [(&str, &str, Role, &str); 3] = [
    ("admin", "admin123", Role::Admin, "Shop Admin"),
    ("tailor", "tailor123", Role::Tailor, "Master Tailor"),
    ("billing", "billing123", Role::Billing, "Billing Desk"),
];

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password_hash: String,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    accounts: RwLock<HashMap<String, Account>>,
}

fn username_key(username: &str) -> String {
    username.trim().to_lowercase()
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the three demo accounts.
    pub fn with_demo_accounts() -> Result<Self, AppError> {
        let directory = Self::new();
        for (username, password, role, display_name) in DEMO_ACCOUNTS {
            directory.add(username, password, role, display_name)?;
        }
        Ok(directory)
    }

    /// Usernames are unique ignoring case.
    pub fn add(
        &self,
        username: &str,
        password: &str,
        role: Role,
        display_name: &str,
    ) -> Result<AuthUser, AppError> {
        let key = username_key(username);
        if key.is_empty() {
            return Err(AppError::invalid_field("username", "Username is required"));
        }
        let password_hash = password::hash_password(password)?;
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&key) {
            return Err(AppError::conflict("This username is already taken"));
        }
        let user = AuthUser {
            id: Uuid::new_v4(),
            username: key.clone(),
            display_name: display_name.to_string(),
            role,
        };
        accounts.insert(
            key,
            Account {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    /// Unknown user and wrong password fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AuthUser, AppError> {
        let account = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&username_key(username))
            .cloned();
        match account {
            Some(account) if password::verify_password(password, &account.password_hash) => {
                Ok(account.user)
            }
            _ => Err(AppError::unauthorized("Invalid username or password")),
        }
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<AuthUser> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|a| a.user.id == id)
            .map(|a| a.user.clone())
    }

    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
