//! Audit trail for commands rejected by the access gate.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::Role;
use crate::config::AuditStorage;
use crate::database::{AuditRepository, Database};

/// Why a command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    /// Caller lacks the required role.
    Denied,
    /// The access check itself failed.
    Error,
}

/// One rejected command invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub command: String,
    pub required_role: Role,
    pub outcome: AuditOutcome,
    pub reason: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

/// Destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record a rejection. Failures are handled inside the sink.
    async fn record(&self, record: &AuditRecord);
}

/// Writes each record as one structured log line.
///
/// Denials go out at `warn`, failed checks at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn record(&self, record: &AuditRecord) {
        match record.outcome {
            AuditOutcome::Denied => warn!(
                user_id = record.user_id,
                username = record.username.as_deref().unwrap_or("-"),
                command = %record.command,
                required_role = %record.required_role,
                outcome = "denied",
                reason = %record.reason,
                timestamp = %record.timestamp,
                "Access denied"
            ),
            AuditOutcome::Error => error!(
                user_id = record.user_id,
                username = record.username.as_deref().unwrap_or("-"),
                command = %record.command,
                required_role = %record.required_role,
                outcome = "error",
                reason = %record.reason,
                timestamp = %record.timestamp,
                "Access check failed"
            ),
        }
    }
}

/// Log line plus a document in `access_audit`.
pub struct MongoAuditSink {
    repo: AuditRepository,
}

impl MongoAuditSink {
    pub fn new(repo: AuditRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuditSink for MongoAuditSink {
    async fn record(&self, record: &AuditRecord) {
        LogAuditSink.record(record).await;

        if let Err(e) = self.repo.insert(record).await {
            error!("Failed to persist audit record for user {}: {}", record.user_id, e);
        }
    }
}

/// Build the sink selected by configuration.
pub async fn build_sink(storage: AuditStorage, db: &Database) -> anyhow::Result<Arc<dyn AuditSink>> {
    let sink: Arc<dyn AuditSink> = match storage {
        AuditStorage::Log => Arc::new(LogAuditSink),
        AuditStorage::Database => {
            let repo = AuditRepository::new(db);
            repo.ensure_indexes().await?;
            Arc::new(MongoAuditSink::new(repo))
        }
    };
    Ok(sink)
}
