//! Role hierarchy and capability checks.
//!
//! Every protected operation goes through these predicates. The ranking is
//! fixed: viewer < editor < admin. Unrecognized role names rank below every
//! requirement, and unrecognized requirements outrank every role, so both
//! directions fail closed.

use serde::{Deserialize, Serialize};

/// User roles, ordered by capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-only access to own entries and totals.
    Viewer,
    /// Can additionally record new entries.
    Editor,
    /// Full CRUD across all owners.
    Admin,
}

impl Role {
    /// Returns the ordinal rank of this role.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Viewer => 1,
            Self::Editor => 2,
            Self::Admin => 3,
        }
    }

    /// Returns true if this role can record new entries.
    #[must_use]
    pub const fn can_edit(self) -> bool {
        matches!(self, Self::Editor | Self::Admin)
    }

    /// Returns true if this role can edit and delete entries of any owner.
    #[must_use]
    pub const fn can_administer(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// Returns the capability rank of a role name, if recognized.
#[must_use]
pub fn capability_rank(role: &str) -> Option<u8> {
    role.parse::<Role>().ok().map(Role::rank)
}

/// Returns true iff `role` satisfies `required`.
///
/// An unrecognized `role` is treated as rank 0 (denied); an unrecognized
/// `required` can never be satisfied.
#[must_use]
pub fn has_capability(role: &str, required: &str) -> bool {
    let Some(required_rank) = capability_rank(required) else {
        return false;
    };
    capability_rank(role).unwrap_or(0) >= required_rank
}

/// Returns true if the named role can record new entries.
#[must_use]
pub fn can_edit(role: &str) -> bool {
    has_capability(role, Role::Editor.as_str())
}

/// Returns true if the named role can edit and delete entries of any owner.
#[must_use]
pub fn can_administer(role: &str) -> bool {
    has_capability(role, Role::Admin.as_str())
}
