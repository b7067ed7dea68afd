//! /help command plugin.

use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};

use super::Command;
use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::i18n::{get_text, role_name};

/// Handle the /help command.
pub async fn help_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, help_text(&state.locale))
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

/// Command list with the minimum role for each.
pub fn help_text(locale: &str) -> String {
    let mut text = get_text(locale, "help.header");
    text.push('\n');

    for command in Command::all() {
        let who = match command.required_role() {
            Some(role) => role_name(locale, role),
            None => get_text(locale, "help.public"),
        };
        text.push_str(&format!(
            "\n/{} - {} <i>({})</i>",
            command.name(),
            get_text(locale, &format!("help.commands.{}", command.name())),
            who
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command_with_role() {
        let text = help_text("en");

        assert!(text.contains("/id - show your Telegram ID <i>(everyone)</i>"));
        assert!(text.contains("/start - main menu <i>(Manager)</i>"));
        assert!(text.contains("/admins - list administrators <i>(Administrator)</i>"));
    }

    #[test]
    fn test_help_has_no_missing_keys() {
        for locale in ["en", "ru"] {
            assert!(!help_text(locale).contains("help.commands."));
        }
    }
}
