//! Database module exports.

mod error;
mod models;
mod mongo;
mod repository;

pub use error::RepositoryError;
pub use models::Admin;
pub use mongo::Database;
pub use repository::{AdminRepository, AdminStore, AuditRepository};

#[cfg(test)]
pub use repository::memory::MemoryAdminStore;
