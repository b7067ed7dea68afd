//! Administrator records.

use mongodb::bson::{Bson, DateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::database::RepositoryError;
use crate::permissions::Role;

/// Raw `admins` document, as inserted by provisioning.
///
/// The role is kept as a string here and only becomes a [`Role`] through
/// [`Admin::try_from`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDocument {
    /// Telegram user ID.
    #[serde(deserialize_with = "deserialize_admin_id")]
    pub admin_id: i64,
    /// One of `super_admin`, `admin`, `manager`.
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime>,
}

/// Accept any integral BSON number.
///
/// Shell inserts store large Telegram IDs as doubles.
fn deserialize_admin_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::Int32(id) => Ok(id.into()),
        Bson::Int64(id) => Ok(id),
        Bson::Double(id) if id.fract() == 0.0 && id.abs() < 9.0e15 => Ok(id as i64),
        other => Err(D::Error::custom(format!("admin_id must be an integer, got {other}"))),
    }
}

/// Administrator with a validated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admin {
    pub admin_id: i64,
    pub role: Role,
}

impl TryFrom<AdminDocument> for Admin {
    type Error = RepositoryError;

    fn try_from(doc: AdminDocument) -> Result<Self, Self::Error> {
        let role = doc.role.parse().map_err(|source| RepositoryError::UnknownRole {
            user_id: doc.admin_id,
            source,
        })?;

        Ok(Self {
            admin_id: doc.admin_id,
            role,
        })
    }
}
