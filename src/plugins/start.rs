//! /start command plugin.
//!
//! Greets an administrator. Requires at least the manager role.

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::i18n::{get_text, role_name};
use crate::permissions::Authorized;

/// Handle the /start command.
pub async fn start_handler(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    auth: Authorized,
) -> anyhow::Result<()> {
    let name = msg
        .from
        .as_ref()
        .map(|u| u.first_name.clone())
        .unwrap_or_default();

    let text = get_text(&state.locale, "start.greeting")
        .replace("{name}", &name)
        .replace("{role}", &role_name(&state.locale, auth.role));

    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    info!("/start answered for user {} ({})", auth.user_id, auth.role);
    Ok(())
}
