//! /admins command plugin.
//!
//! Lists registered administrators grouped by role. Requires the admin role.

use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use tracing::error;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::database::Admin;
use crate::i18n::{get_text, role_name};
use crate::permissions::{Authorized, Role};

/// Handle the /admins command.
pub async fn admins_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    auth: Authorized,
) -> anyhow::Result<()> {
    let text = match state.admins.list().await {
        Ok(admins) => format_admins(&state.locale, &admins),
        Err(e) => {
            error!("Failed to list administrators for user {}: {}", auth.user_id, e);
            get_text(&state.locale, "access.error")
        }
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}

/// Render administrators grouped by role, highest role first.
fn format_admins(locale: &str, admins: &[Admin]) -> String {
    if admins.is_empty() {
        return get_text(locale, "admins.empty");
    }

    let mut text = get_text(locale, "admins.header");

    for role in Role::all() {
        let ids: Vec<String> = admins
            .iter()
            .filter(|a| a.role == role)
            .map(|a| format!("<code>{}</code>", a.admin_id))
            .collect();

        if ids.is_empty() {
            continue;
        }

        text.push_str(&format!("\n\n<b>{}</b>\n{}", role_name(locale, role), ids.join("\n")));
    }

    text
}
