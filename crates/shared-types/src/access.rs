//! Which pages exist and who may open them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::navigation::{validate_registry, RegistryError, BOTTOM_NAV, DRAWER_NAV};
use crate::role::{Role, RoleSet};

/// Path of the sign-in page. Denied visitors are sent here.
pub const SIGN_IN_PATH: &str = "/";

/// Every role-gated page of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    AdminDashboard,
    Customers,
    Billing,
    Tailors,
    Reports,
    TailorJobs,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::AdminDashboard,
        Page::Customers,
        Page::Billing,
        Page::Tailors,
        Page::Reports,
        Page::TailorJobs,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Page::AdminDashboard => "/admin",
            Page::Customers => "/admin/customers",
            Page::Billing => "/admin/billing",
            Page::Tailors => "/admin/tailors",
            Page::Reports => "/admin/reports",
            Page::TailorJobs => "/tailor",
        }
    }

    /// Roles allowed to open the page. The REST endpoints backing a page
    /// are gated with the same set.
    pub const fn allowed_roles(self) -> RoleSet {
        match self {
            Page::AdminDashboard | Page::Tailors | Page::Reports => RoleSet::of(&[Role::Admin]),
            Page::Customers | Page::Billing => RoleSet::of(&[Role::Admin, Role::Billing]),
            Page::TailorJobs => RoleSet::of(&[Role::Tailor]),
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Page::AdminDashboard => "Dashboard",
            Page::Customers => "Customers",
            Page::Billing => "Billing",
            Page::Tailors => "Tailors",
            Page::Reports => "Reports",
            Page::TailorJobs => "My Jobs",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.path() == path)
    }

    pub fn is_open_to(self, role: Option<Role>) -> bool {
        self.allowed_roles().allows(role)
    }
}

/// Check the page table: no page without roles, no two pages on one path.
pub fn validate_route_table() -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for page in Page::ALL {
        if page.allowed_roles().is_empty() {
            return Err(RegistryError::EmptyRoleSet { path: page.path() });
        }
        if !seen.insert(page.path()) {
            return Err(RegistryError::DuplicatePath { path: page.path() });
        }
    }
    Ok(())
}

/// Validate the page table and both navigation registries. Run once at start-up.
pub fn validate_static_tables() -> Result<(), RegistryError> {
    validate_route_table()?;
    validate_registry(BOTTOM_NAV)?;
    validate_registry(DRAWER_NAV)
}

/// Lifecycle of a guarded page.
///
/// Starts in `Checking`; the first resolution moves it to `Authorized` or
/// `Denied`, and it stays there for the rest of the page's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Checking,
    Authorized,
    Denied,
}

impl GuardState {
    /// Decide access once the session role is known.
    pub fn resolve(self, role: Option<Role>, allowed: RoleSet) -> GuardState {
        match self {
            GuardState::Checking if allowed.allows(role) => GuardState::Authorized,
            GuardState::Checking => GuardState::Denied,
            terminal => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GuardState::Checking
    }

    /// Children are rendered only in this state.
    pub fn renders_children(self) -> bool {
        self == GuardState::Authorized
    }

    pub fn should_redirect(self) -> bool {
        self == GuardState::Denied
    }
}
