//! Rentbot - rental administration Telegram bot
//!
//! Administrative commands gated by a three-tier role hierarchy
//! (super admin > admin > manager).
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - MongoDB integration (administrators, audit trail)
//! - `permissions` - Roles, access checks and the command gate
//! - `bot` - Dispatcher and runtime (with Throttle for API rate limiting)
//! - `plugins` - Command handlers
//! - `i18n` - Reply texts
//! - `utils` - Utility functions

mod bot;
mod config;
mod database;
mod i18n;
mod permissions;
mod plugins;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::AppState;
use config::Config;
use database::{AdminRepository, Database};
use permissions::{AccessGate, AccessService};
use plugins::Command;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first; it also decides the default log level
    let config = Config::from_env()?;

    // If RUST_LOG is not set, fall back to LOG_LEVEL for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rentbot={},teloxide=warn", config.log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting rentbot...");
    info!("Bot mode: {:?}, audit storage: {:?}", config.bot_mode, config.audit_storage);
    info!("Loaded {} reply languages, using {:?}", i18n::init(), config.locale);

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;

    let admins = AdminRepository::new(&db);
    admins.ensure_indexes().await?;
    info!("Database connected");

    let audit = permissions::build_sink(config.audit_storage, &db).await?;
    let gate = AccessGate::new(
        AccessService::new(Arc::new(admins.clone())),
        audit,
        config.locale.as_str(),
    );

    // Throttle respects Telegram's rate limits:
    // - 30 messages per second globally
    // - 1 message per second to the same chat
    // - 20 messages per minute to the same group
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    bot.set_my_commands(Command::bot_commands()).await?;

    let state = AppState {
        admins,
        locale: config.locale.as_str().into(),
    };

    let dispatcher = bot::build_dispatcher(bot.clone(), state, gate);
    bot::run(&config, bot, dispatcher).await
}
