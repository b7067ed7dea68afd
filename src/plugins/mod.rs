//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding a variant to [`Command`] with its minimum role
//! 4. Adding the handler to `command_handler()`

pub mod admins;
pub mod help;
pub mod id;
pub mod start;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::permissions::gate;
use crate::permissions::Role;

/// All bot commands.
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show your Telegram ID")]
    Id,

    #[command(description = "list available commands")]
    Help,

    #[command(description = "main menu")]
    Start,

    #[command(description = "list administrators")]
    Admins,
}

impl Command {
    /// Every command, in help order.
    pub const fn all() -> [Command; 4] {
        [Self::Id, Self::Help, Self::Start, Self::Admins]
    }

    /// Command name as typed after the slash.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Help => "help",
            Self::Start => "start",
            Self::Admins => "admins",
        }
    }

    /// Minimum role, `None` for public commands.
    pub const fn required_role(self) -> Option<Role> {
        match self {
            Self::Id | Self::Help => None,
            Self::Start => Some(Role::Manager),
            Self::Admins => Some(Role::Admin),
        }
    }
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        // Public
        .branch(case![Command::Id].endpoint(id::id_command))
        .branch(case![Command::Help].endpoint(help::help_command))
        // Role-gated
        .branch(gated(case![Command::Start], Command::Start).endpoint(start::start_handler))
        .branch(gated(case![Command::Admins], Command::Admins).endpoint(admins::admins_command))
}

/// Put the access gate for `command` behind its routing filter.
fn gated(
    route: UpdateHandler<anyhow::Error>,
    command: Command,
) -> UpdateHandler<anyhow::Error> {
    match command.required_role() {
        Some(role) => route.chain(gate::require_role(role)),
        None => route,
    }
}
