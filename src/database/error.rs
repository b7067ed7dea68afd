//! Repository error types.

use mongodb::error::ErrorKind;
use thiserror::Error;

use crate::permissions::UnknownRole;

/// Failure to resolve an administrator record.
///
/// Never means "not an administrator": absence is `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A stored role string is outside the known role set.
    #[error("administrator {user_id} has invalid stored role: {source}")]
    UnknownRole {
        user_id: i64,
        #[source]
        source: UnknownRole,
    },

    /// A stored document does not match the expected shape.
    #[error("invalid administrator record: {0}")]
    InvalidRecord(String),

    /// The lookup could not complete (connectivity or driver failure).
    #[error("administrator store unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        if let ErrorKind::BsonDeserialization(e) = err.kind.as_ref() {
            return Self::InvalidRecord(e.to_string());
        }
        Self::Unavailable(err.into())
    }
}
