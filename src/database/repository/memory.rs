//! In-memory administrator store for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::AdminStore;
use crate::database::models::{Admin, AdminDocument};
use crate::database::RepositoryError;
use crate::permissions::Role;

/// Holds raw role strings so invalid stored data can be simulated.
#[derive(Default)]
pub struct MemoryAdminStore {
    roles: DashMap<i64, String>,
    offline: AtomicBool,
    lookups: AtomicUsize,
}

impl MemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admins(admins: &[(i64, &str)]) -> Self {
        let store = Self::new();
        for (id, role) in admins {
            store.set_raw(*id, role);
        }
        store
    }

    pub fn set_raw(&self, user_id: i64, role: &str) {
        self.roles.insert(user_id, role.to_string());
    }

    pub fn remove(&self, user_id: i64) {
        self.roles.remove(&user_id);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn find_role_by_user_id(&self, user_id: i64) -> Result<Option<Role>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(anyhow::anyhow!(
                "connection refused"
            )));
        }

        let Some(raw) = self.roles.get(&user_id).map(|r| r.value().clone()) else {
            return Ok(None);
        };

        let admin = Admin::try_from(AdminDocument {
            admin_id: user_id,
            role: raw,
            created: None,
            updated: None,
        })?;
        Ok(Some(admin.role))
    }
}
