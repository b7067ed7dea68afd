//! /id command plugin.
//!
//! Public command showing the caller's Telegram ID, so it can be handed to
//! whoever provisions administrator records.

use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters, User};
use tracing::info;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::i18n::get_text;
use crate::utils::{full_name, html_escape};

/// Handle the /id command.
pub async fn id_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    bot.send_message(msg.chat.id, id_text(&state.locale, user))
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    info!("/id answered for user {}", user.id);
    Ok(())
}

fn id_text(locale: &str, user: &User) -> String {
    let mut text = format!(
        "{}\n\n<code>{}</code>\n\n{} {}\n",
        get_text(locale, "id.title"),
        user.id,
        get_text(locale, "id.name"),
        html_escape(&full_name(&user.first_name, user.last_name.as_deref())),
    );

    if let Some(username) = &user.username {
        text.push_str(&format!("{} @{}\n", get_text(locale, "id.username"), html_escape(username)));
    }

    text
}
