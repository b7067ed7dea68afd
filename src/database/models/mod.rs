//! Database models.

pub mod admin;

pub use admin::{Admin, AdminDocument};
