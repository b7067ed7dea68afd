//! Administrator roles and their privilege ranking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Administrator role.
///
/// Higher roles include every permission of the lower ones:
/// `SuperAdmin` > `Admin` > `Manager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Admin,
    SuperAdmin,
}

/// A stored role identifier outside the known set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Integer rank of the role. Strictly increasing with privilege.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Manager => 1,
            Self::Admin => 2,
            Self::SuperAdmin => 3,
        }
    }

    /// Whether this role covers a command requiring `required`.
    #[inline]
    pub const fn satisfies(self, required: Role) -> bool {
        self.priority() >= required.priority()
    }

    /// All roles, highest priority first.
    pub const fn all() -> [Role; 3] {
        [Self::SuperAdmin, Self::Admin, Self::Manager]
    }

    /// Identifier as stored in the `admins` collection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfies_matches_priority() {
        for actual in Role::all() {
            for required in Role::all() {
                assert_eq!(
                    actual.satisfies(required),
                    actual.priority() >= required.priority(),
                    "{actual} vs {required}"
                );
            }
        }
    }

    #[test]
    fn test_satisfies_is_monotonic() {
        for required in Role::all() {
            for role in Role::all() {
                if !role.satisfies(required) {
                    continue;
                }
                for higher in Role::all().into_iter().filter(|r| r.priority() >= role.priority()) {
                    assert!(higher.satisfies(required));
                }
            }
        }
    }

    #[test]
    fn test_hierarchy() {
        assert!(Role::SuperAdmin.satisfies(Role::Manager));
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(!Role::Admin.satisfies(Role::SuperAdmin));
        assert!(!Role::Manager.satisfies(Role::Admin));
    }

    #[test]
    fn test_all_sorted_by_priority() {
        let priorities: Vec<u8> = Role::all().iter().map(|r| r.priority()).collect();
        assert_eq!(priorities, vec![3, 2, 1]);
    }

    #[test]
    fn test_parse_stored_identifiers() {
        assert_eq!("super_admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("MANAGER".parse::<Role>(), Ok(Role::Manager));

        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("owner".parse::<Role>(), Err(UnknownRole("owner".to_string())));
        assert!("".parse::<Role>().is_err());
        assert!("superadmin".parse::<Role>().is_err());
    }
}
