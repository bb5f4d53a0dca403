//! Role-filtered navigation menus.
//!
//! The registries here are the single source of truth for which menu entries
//! exist and who may see them. Rendering lives in `shared-ui`; this module has
//! no UI dependency so it can be exercised without a running component tree.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::role::{Role, RoleSet};

/// Opaque icon identifier. The UI layer decides what each one looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconRef {
    Home,
    Users,
    Receipt,
    Scissors,
    BarChart,
}

/// One menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: IconRef,
    pub allowed_roles: RoleSet,
}

impl NavigationEntry {
    pub const fn new(
        path: &'static str,
        label: &'static str,
        icon: IconRef,
        allowed_roles: RoleSet,
    ) -> Self {
        Self {
            path,
            label,
            icon,
            allowed_roles,
        }
    }

    pub fn visible_to(&self, role: Option<Role>) -> bool {
        self.allowed_roles.allows(role)
    }
}

const ADMIN: RoleSet = RoleSet::of(&[Role::Admin]);
const ADMIN_BILLING: RoleSet = RoleSet::of(&[Role::Admin, Role::Billing]);
const TAILOR: RoleSet = RoleSet::of(&[Role::Tailor]);

/// Maximum number of entries shown in the mobile bottom bar.
pub const MAX_BOTTOM_NAV_ITEMS: usize = 4;

/// Entries of the mobile bottom bar, in display order.
pub const BOTTOM_NAV: &[NavigationEntry] = &[
    NavigationEntry::new("/admin", "Home", IconRef::Home, ADMIN),
    NavigationEntry::new("/admin/customers", "Customers", IconRef::Users, ADMIN_BILLING),
    NavigationEntry::new("/admin/billing", "Billing", IconRef::Receipt, ADMIN_BILLING),
    NavigationEntry::new("/admin/tailors", "Tailors", IconRef::Scissors, ADMIN),
    NavigationEntry::new("/admin/reports", "Reports", IconRef::BarChart, ADMIN),
    NavigationEntry::new("/tailor", "Jobs", IconRef::Scissors, TAILOR),
];

/// Entries of the slide-out drawer menu. Same routes, longer labels, no cap.
pub const DRAWER_NAV: &[NavigationEntry] = &[
    NavigationEntry::new("/admin", "Dashboard", IconRef::Home, ADMIN),
    NavigationEntry::new("/admin/customers", "Customers", IconRef::Users, ADMIN_BILLING),
    NavigationEntry::new("/admin/billing", "Billing", IconRef::Receipt, ADMIN_BILLING),
    NavigationEntry::new("/admin/tailors", "Tailors", IconRef::Scissors, ADMIN),
    NavigationEntry::new("/admin/reports", "Reports", IconRef::BarChart, ADMIN),
    NavigationEntry::new("/tailor", "My Jobs", IconRef::Scissors, TAILOR),
];

/// Entries `role` may see, in registry order, at most `max_items` of them.
///
/// No role means no entries. Fewer matches than `max_items` are returned as-is.
pub fn filter_navigation(
    registry: &[NavigationEntry],
    role: Option<Role>,
    max_items: usize,
) -> Vec<NavigationEntry> {
    if role.is_none() {
        return Vec::new();
    }
    registry
        .iter()
        .filter(|entry| entry.visible_to(role))
        .take(max_items)
        .copied()
        .collect()
}

/// Like [`filter_navigation`], but `None` when there is nothing to render.
/// Callers render no container at all in that case.
pub fn navigation_for(
    registry: &[NavigationEntry],
    role: Option<Role>,
    max_items: usize,
) -> Option<Vec<NavigationEntry>> {
    let entries = filter_navigation(registry, role, max_items);
    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

/// Whether the entry at `entry_path` is highlighted while `current_path` is shown.
///
/// Exact comparison: `/admin/customers/123` does not activate `/admin/customers`.
pub fn is_active(current_path: &str, entry_path: &str) -> bool {
    current_path == entry_path
}

/// Problems found in a static navigation or page table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    EmptyRoleSet { path: &'static str },
    EmptyPath { label: &'static str },
    DuplicatePath { path: &'static str },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyRoleSet { path } => {
                write!(f, "{path} allows no roles and would be hidden from everyone")
            }
            RegistryError::EmptyPath { label } => write!(f, "entry {label:?} has an empty path"),
            RegistryError::DuplicatePath { path } => write!(f, "{path} is declared twice"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Check a registry: every entry has a path and at least one role, no path repeats.
pub fn validate_registry(registry: &[NavigationEntry]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for entry in registry {
        if entry.path.is_empty() {
            return Err(RegistryError::EmptyPath { label: entry.label });
        }
        if entry.allowed_roles.is_empty() {
            return Err(RegistryError::EmptyRoleSet { path: entry.path });
        }
        if !seen.insert(entry.path) {
            return Err(RegistryError::DuplicatePath { path: entry.path });
        }
    }
    Ok(())
}
