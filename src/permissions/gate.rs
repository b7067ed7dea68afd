//! Access gate for role-restricted commands.
//!
//! The gate sits between command routing and the handler endpoint:
//!
//! ```text
//! Received -> Checking -> Allowed -> Dispatched
//!                      -> Denied  -> Rejected
//!                      -> Error   -> Rejected
//! ```
//!
//! Attach it per command registration:
//!
//! ```rust,ignore
//! case![Command::Admins]
//!     .chain(gate::require_role(Role::Admin))
//!     .endpoint(admins::admins_command)
//! ```
//!
//! On rejection the handler never runs; the caller gets one notification and
//! the audit sink gets one record.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ReplyParameters};
use tracing::{debug, warn};

use super::audit::{AuditOutcome, AuditRecord, AuditSink};
use super::service::{AccessDecision, AccessService, DenialReason};
use super::Role;
use crate::bot::dispatcher::ThrottledBot;
use crate::i18n::{get_text, role_name};

/// Sender of an incoming command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub username: Option<String>,
    /// Command name without the leading slash or `@botname` suffix.
    pub command: String,
}

impl Caller {
    /// Extract the caller from a command message.
    ///
    /// Returns `None` for messages without a sender (e.g. channel posts).
    pub fn from_message(msg: &Message) -> Option<Self> {
        let user = msg.from.as_ref()?;
        Some(Self {
            user_id: user.id.0 as i64,
            username: user.username.clone(),
            command: command_name(msg.text().unwrap_or_default()),
        })
    }
}

/// `/start@rent_bot args` -> `start`
fn command_name(text: &str) -> String {
    text.split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Channel back to the caller for rejection notices.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> anyhow::Result<()>;
}

/// Replies to the command message in its chat.
pub struct TelegramNotifier {
    bot: ThrottledBot,
    chat_id: ChatId,
    reply_to: MessageId,
}

impl TelegramNotifier {
    pub fn new(bot: ThrottledBot, msg: &Message) -> Self {
        Self {
            bot,
            chat_id: msg.chat.id,
            reply_to: msg.id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> anyhow::Result<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_parameters(ReplyParameters::new(self.reply_to))
            .await?;
        Ok(())
    }
}

/// Proof that the caller passed the gate, injected into the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorized {
    pub user_id: i64,
    pub role: Role,
}

/// Enforces access decisions around command handlers.
#[derive(Clone)]
pub struct AccessGate {
    service: AccessService,
    audit: Arc<dyn AuditSink>,
    locale: Arc<str>,
}

impl AccessGate {
    pub fn new(service: AccessService, audit: Arc<dyn AuditSink>, locale: impl Into<Arc<str>>) -> Self {
        Self {
            service,
            audit,
            locale: locale.into(),
        }
    }

    /// Run the access check for `caller`.
    ///
    /// Returns `Some` when the handler may run. Otherwise the caller has been
    /// notified and an audit record emitted.
    pub async fn authorize(
        &self,
        caller: &Caller,
        required: Role,
        notifier: &dyn Notifier,
    ) -> Option<Authorized> {
        debug!(
            "Checking /{} for user {} (requires {})",
            caller.command, caller.user_id, required
        );

        match self.service.check_access(caller.user_id, required).await {
            Ok(AccessDecision::Allowed { role }) => {
                debug!("User {} allowed as {}", caller.user_id, role);
                Some(Authorized {
                    user_id: caller.user_id,
                    role,
                })
            }
            Ok(AccessDecision::Denied { role, reason }) => {
                let text = self.denial_text(required, role, reason);
                self.reject(caller, required, AuditOutcome::Denied, reason.to_string(), &text, notifier)
                    .await;
                None
            }
            Err(err) => {
                // Internal detail stays in the audit record
                let text = get_text(&self.locale, "access.error");
                self.reject(caller, required, AuditOutcome::Error, err.to_string(), &text, notifier)
                    .await;
                None
            }
        }
    }

    fn denial_text(&self, required: Role, role: Option<Role>, reason: DenialReason) -> String {
        match (reason, role) {
            (DenialReason::InsufficientRole, Some(role)) => {
                get_text(&self.locale, "access.denied_insufficient")
                    .replace("{required}", &role_name(&self.locale, required))
                    .replace("{role}", &role_name(&self.locale, role))
            }
            _ => get_text(&self.locale, "access.denied_not_admin"),
        }
    }

    async fn reject(
        &self,
        caller: &Caller,
        required: Role,
        outcome: AuditOutcome,
        reason: String,
        text: &str,
        notifier: &dyn Notifier,
    ) {
        if let Err(e) = notifier.notify(text).await {
            warn!("Failed to notify user {}: {}", caller.user_id, e);
        }

        let record = AuditRecord {
            user_id: caller.user_id,
            username: caller.username.clone(),
            command: caller.command.clone(),
            required_role: required,
            outcome,
            reason,
            timestamp: Utc::now(),
        };
        self.audit.record(&record).await;
    }
}

/// Gate fragment for a command branch.
///
/// Extracts the caller and a reply channel from the message, then applies
/// [`authorize`]. Requires `AccessGate`, `ThrottledBot` and `Message` in the
/// dependency map.
pub fn require_role(required: Role) -> UpdateHandler<anyhow::Error> {
    dptree::filter_map(|msg: Message| Caller::from_message(&msg))
        .chain(dptree::map(|bot: ThrottledBot, msg: Message| -> Arc<dyn Notifier> {
            Arc::new(TelegramNotifier::new(bot, &msg))
        }))
        .chain(authorize(required))
}

/// Transport-independent part of the gate.
///
/// Consumes `Caller`, `Arc<dyn Notifier>` and `AccessGate`; on success it
/// injects [`Authorized`] and the rest of the chain runs with its original
/// dependencies untouched.
pub fn authorize(required: Role) -> UpdateHandler<anyhow::Error> {
    dptree::filter_map_async(
        move |caller: Caller, notifier: Arc<dyn Notifier>, gate: AccessGate| async move {
            gate.authorize(&caller, required, notifier.as_ref()).await
        },
    )
}
