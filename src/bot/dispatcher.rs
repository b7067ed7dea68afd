//! Message dispatcher setup.
//!
//! Builds the dispatcher with all command handlers and the access gate.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::database::AdminRepository;
use crate::permissions::AccessGate;
use crate::plugins;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Administrator records.
    pub admins: AdminRepository,

    /// Reply language.
    pub locale: Arc<str>,
}

/// Build the dispatcher with all handlers.
///
/// `AccessGate` is registered as its own dependency so the gate fragment
/// can be chained onto any command branch.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
    gate: AccessGate,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state, gate])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message().branch(plugins::command_handler())
}
