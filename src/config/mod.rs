//! Configuration module for the rentbot.
//!
//! Loads configuration from environment variables once at startup. The
//! resulting [`Config`] is passed by reference to whatever needs it.

use std::env;

use serde::Deserialize;
use thiserror::Error;

/// Bot running mode
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

/// Where audit records for rejected commands end up.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditStorage {
    /// Transient structured log line only.
    #[default]
    Log,
    /// Log line plus a document in the `access_audit` collection.
    Database,
}

/// Configuration loading errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    /// Audit record destination for denied/failed commands.
    pub audit_storage: AuditStorage,

    /// Reply language.
    pub locale: String,

    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_mode = match get("BOT_MODE").map(|m| m.to_lowercase()).as_deref() {
            None | Some("polling") => BotMode::Polling,
            Some("webhook") => BotMode::Webhook,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "BOT_MODE",
                    value: other.to_string(),
                });
            }
        };

        let webhook_url = get("WEBHOOK_URL");
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            return Err(ConfigError::Missing("WEBHOOK_URL"));
        }

        let webhook_port = match get("WEBHOOK_PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::Invalid {
                key: "WEBHOOK_PORT",
                value: port,
            })?,
            None => 8443,
        };

        let audit_storage = match get("AUDIT_STORAGE").map(|s| s.to_lowercase()).as_deref() {
            None | Some("log") => AuditStorage::Log,
            Some("database") => AuditStorage::Database,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "AUDIT_STORAGE",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            bot_token: get("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?,
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret: get("WEBHOOK_SECRET"),
            mongodb_uri: get("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
            mongodb_database: get("MONGODB_DATABASE").unwrap_or_else(|| "rentbot".to_string()),
            audit_storage,
            locale: get("LOCALE")
                .map(|l| l.to_lowercase())
                .unwrap_or_else(|| "ru".to_string()),
            log_level: get("LOG_LEVEL")
                .map(|l| l.to_lowercase())
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("BOT_TOKEN", "123:abc"), ("MONGODB_URI", "mongodb://localhost")]).unwrap();

        assert_eq!(config.bot_mode, BotMode::Polling);
        assert_eq!(config.webhook_port, 8443);
        assert_eq!(config.mongodb_database, "rentbot");
        assert_eq!(config.audit_storage, AuditStorage::Log);
        assert_eq!(config.locale, "ru");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_token() {
        let err = load(&[("MONGODB_URI", "mongodb://localhost")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BOT_TOKEN"));
    }

    #[test]
    fn test_webhook_requires_url() {
        let err = load(&[
            ("BOT_TOKEN", "t"),
            ("MONGODB_URI", "mongodb://localhost"),
            ("BOT_MODE", "webhook"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("WEBHOOK_URL"));
    }

    #[test]
    fn test_audit_storage_database() {
        let config = load(&[
            ("BOT_TOKEN", "t"),
            ("MONGODB_URI", "mongodb://localhost"),
            ("AUDIT_STORAGE", "Database"),
        ])
        .unwrap();
        assert_eq!(config.audit_storage, AuditStorage::Database);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = load(&[
            ("BOT_TOKEN", "t"),
            ("MONGODB_URI", "mongodb://localhost"),
            ("AUDIT_STORAGE", "kafka"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "AUDIT_STORAGE", .. }));

        let err = load(&[
            ("BOT_TOKEN", "t"),
            ("MONGODB_URI", "mongodb://localhost"),
            ("WEBHOOK_PORT", "port"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "WEBHOOK_PORT", .. }));
    }
}
