//! Access decisions for role-gated commands.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::Role;
use crate::database::{AdminStore, RepositoryError};

/// Why a caller was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No administrator record for the caller.
    NotAdministrator,
    /// Record exists but its role ranks below the required one.
    InsufficientRole,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotAdministrator => "not an administrator",
            Self::InsufficientRole => "insufficient role",
        })
    }
}

/// Outcome of a single access check. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed {
        role: Role,
    },
    Denied {
        /// Resolved role, `None` when the caller is not an administrator.
        role: Option<Role>,
        reason: DenialReason,
    },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Stateless access checker.
///
/// Every call queries the store; nothing is cached, so a promotion or
/// demotion applies to the very next check.
#[derive(Clone)]
pub struct AccessService {
    store: Arc<dyn AdminStore>,
}

impl AccessService {
    pub fn new(store: Arc<dyn AdminStore>) -> Self {
        Self { store }
    }

    /// Decide whether `user_id` may run a command requiring `required`.
    ///
    /// # Errors
    /// Returns the store's error when the lookup fails or the stored role is
    /// invalid. Such failures are never reported as a denial.
    pub async fn check_access(
        &self,
        user_id: i64,
        required: Role,
    ) -> Result<AccessDecision, RepositoryError> {
        let decision = match self.store.find_role_by_user_id(user_id).await? {
            None => AccessDecision::Denied {
                role: None,
                reason: DenialReason::NotAdministrator,
            },
            Some(role) if role.satisfies(required) => AccessDecision::Allowed { role },
            Some(role) => AccessDecision::Denied {
                role: Some(role),
                reason: DenialReason::InsufficientRole,
            },
        };

        debug!(
            user_id,
            required = %required,
            allowed = decision.is_allowed(),
            "Access check for user {}",
            user_id
        );

        Ok(decision)
    }
}
