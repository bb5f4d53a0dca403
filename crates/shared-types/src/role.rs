use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shop staff role controlling which pages and menu entries a user sees.
///
/// - `Admin`: owner or manager, sees everything.
/// - `Billing`: counter staff. Customers and billing only.
/// - `Tailor`: workshop staff. Their own job list only.
///
/// A signed-out or unrecognized user has no role at all. That case is
/// `Option<Role>::None`, never a variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Billing,
    Tailor,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Billing, Role::Tailor];

    /// Parse a session role string. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "billing" => Some(Role::Billing),
            "tailor" => Some(Role::Tailor),
            _ => None,
        }
    }

    /// Resolve the role of an optional session value.
    pub fn from_session(value: Option<&str>) -> Option<Self> {
        value.and_then(Self::parse)
    }

    /// Lowercase string for tokens and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Billing => "billing",
            Role::Tailor => "tailor",
        }
    }

    /// Human-readable name for badges and selects.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Billing => "Billing Staff",
            Role::Tailor => "Tailor",
        }
    }

    /// Page a user lands on right after signing in.
    pub const fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Billing => "/admin/billing",
            Role::Tailor => "/tailor",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Role::Admin => 1,
            Role::Billing => 1 << 1,
            Role::Tailor => 1 << 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string names no known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {:?}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A set of roles, stored as a bitmask so it can be built in `const` context
/// and carried as a const generic (see the server's `RolesRequired`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    /// Build a set from a list of roles.
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    /// Rebuild a set from raw bits. Bits that name no role are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        RoleSet(bits & RoleSet::of(&Role::ALL).0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Membership test for an optional session role. No role is never allowed.
    pub fn allows(self, role: Option<Role>) -> bool {
        role.is_some_and(|r| self.contains(r))
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        RoleSet(iter.into_iter().fold(0, |bits, r| bits | r.bit()))
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = Vec::<Role>::deserialize(deserializer)?;
        Ok(roles.into_iter().collect())
    }
}
