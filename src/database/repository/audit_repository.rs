//! Durable audit trail for rejected commands.

use mongodb::bson::doc;
use mongodb::{Collection, IndexModel};
use tracing::debug;

use crate::database::{Database, RepositoryError};
use crate::permissions::AuditRecord;

/// Repository for the `access_audit` collection.
#[derive(Clone)]
pub struct AuditRepository {
    collection: Collection<AuditRecord>,
}

impl AuditRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("access_audit"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        let by_time = IndexModel::builder().keys(doc! { "timestamp": -1 }).build();
        self.collection.create_index(by_time).await?;
        Ok(())
    }

    pub async fn insert(&self, record: &AuditRecord) -> Result<(), RepositoryError> {
        self.collection.insert_one(record).await?;
        debug!("Stored audit record for user {}", record.user_id);
        Ok(())
    }
}
