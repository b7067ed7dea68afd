//! Administrator repository.
//!
//! Read-only access to the `admins` collection. Records are provisioned by
//! direct insertion; the bot never creates, updates or deletes them.
//! Lookups are uncached so role changes apply on the very next check.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::{debug, info};

use super::AdminStore;
use crate::database::models::{Admin, AdminDocument};
use crate::database::{Database, RepositoryError};
use crate::permissions::Role;

/// Repository for administrator records.
#[derive(Clone)]
pub struct AdminRepository {
    collection: Collection<AdminDocument>,
}

impl AdminRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("admins"),
        }
    }

    /// Create the unique `admin_id` index and the `role` index.
    pub async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        let by_admin_id = IndexModel::builder()
            .keys(doc! { "admin_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let by_role = IndexModel::builder().keys(doc! { "role": 1 }).build();

        self.collection.create_index(by_admin_id).await?;
        self.collection.create_index(by_role).await?;

        info!("Indexes on admins ensured");
        Ok(())
    }

    /// Get an administrator by Telegram ID.
    pub async fn get_by_admin_id(&self, admin_id: i64) -> Result<Option<Admin>, RepositoryError> {
        let found = self
            .collection
            .find_one(doc! { "admin_id": admin_id })
            .await?;
        debug!("DB get admin {}: {:?}", admin_id, found.is_some());

        found.map(Admin::try_from).transpose()
    }

    /// All administrators, highest role first, then by ID.
    pub async fn list(&self) -> Result<Vec<Admin>, RepositoryError> {
        let docs: Vec<AdminDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "admin_id": 1 })
            .await?
            .try_collect()
            .await?;

        let mut admins = docs
            .into_iter()
            .map(Admin::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        admins.sort_by_key(|a| (std::cmp::Reverse(a.role.priority()), a.admin_id));

        Ok(admins)
    }
}

#[async_trait]
impl AdminStore for AdminRepository {
    async fn find_role_by_user_id(&self, user_id: i64) -> Result<Option<Role>, RepositoryError> {
        Ok(self.get_by_admin_id(user_id).await?.map(|admin| admin.role))
    }
}
