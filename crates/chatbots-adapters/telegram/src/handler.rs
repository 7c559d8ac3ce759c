//! Built-in Telegram handlers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chatbots_core::{
    Handler, HandlerResult, STATIC_COMMAND_ORDER, SlashCommandParser, TextResourceLoader,
    command_matches, normalize_command,
};
use tracing::debug;

use crate::config::TelegramBotConfiguration;
use crate::model::{SendMethod, Update};
use crate::parser::{TelegramSlashCommandParser, TelegramSpaceParser};
use crate::reply::{compose_send_message, parse_mode_of};

/// Answers a slash command with static text from a [`TextResourceLoader`].
///
/// The handler only claims an update when the command matches *and* text
/// exists for it, so a command without text falls through to later handlers.
/// The text is sent with the parse mode matching its file kind.
pub struct StaticCommandHandler {
    command: String,
    loader: Arc<dyn TextResourceLoader>,
    order: i32,
}

impl StaticCommandHandler {
    /// Creates a handler for `command` (`/about` or `about`).
    pub fn new(command: &str, loader: Arc<dyn TextResourceLoader>) -> Self {
        Self {
            command: normalize_command(command),
            loader,
            order: STATIC_COMMAND_ORDER,
        }
    }

    /// Overrides the default order.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Returns the normalized command this handler answers.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl fmt::Debug for StaticCommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCommandHandler")
            .field("command", &self.command)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler<TelegramBotConfiguration, Update, SendMethod> for StaticCommandHandler {
    fn can_handle(&self, bot: Option<&TelegramBotConfiguration>, update: &Update) -> bool {
        TelegramSlashCommandParser
            .parse(bot, update)
            .is_some_and(|command| command_matches(&command, &self.command))
            && update.chat().is_some()
            && self.loader.compose_command_response(&self.command).is_some()
    }

    async fn handle(
        &self,
        _bot: Option<&TelegramBotConfiguration>,
        update: &Update,
    ) -> HandlerResult<SendMethod> {
        let Some(response) = self.loader.compose_command_response(&self.command) else {
            debug!(command = %self.command, "Command text disappeared");
            return Ok(None);
        };

        let parse_mode = parse_mode_of(response.extension);
        Ok(
            compose_send_message(&TelegramSpaceParser, update, response.text, Some(parse_mode))
                .map(SendMethod::Message),
        )
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn name(&self) -> &str {
        &self.command
    }
}
