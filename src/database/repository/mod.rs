//! Repository module - data access layer.

mod admin_repository;
mod audit_repository;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use super::RepositoryError;
use crate::permissions::Role;

pub use admin_repository::AdminRepository;
pub use audit_repository::AuditRepository;

/// Lookup of administrator roles by Telegram user ID.
///
/// `Ok(None)` means "not an administrator"; `Err` means the lookup failed
/// and says nothing about authorization.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_role_by_user_id(&self, user_id: i64) -> Result<Option<Role>, RepositoryError>;
}
