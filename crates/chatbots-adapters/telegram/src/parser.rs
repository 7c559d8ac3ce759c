//! Command and space extraction from Telegram updates.

use chatbots_core::{SlashCommandParser, SpaceParser, parse_slash_command_for};

use crate::config::TelegramBotConfiguration;
use crate::model::{Chat, Update};

/// Reads the slash command from the text of a newly received message.
///
/// `/help@other_bot` is ignored when the bot's username is known and differs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramSlashCommandParser;

impl SlashCommandParser<TelegramBotConfiguration, Update> for TelegramSlashCommandParser {
    fn parse(&self, bot: Option<&TelegramBotConfiguration>, update: &Update) -> Option<String> {
        parse_slash_command_for(update.text()?, bot)
    }
}

/// Returns the chat of an update's message, edited message, channel post or
/// callback query message.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramSpaceParser;

impl SpaceParser<Update, Chat> for TelegramSpaceParser {
    fn parse(&self, update: &Update) -> Option<Chat> {
        update.chat().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_update(text: &str) -> Update {
        Update::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "chat": { "id": 100, "type": "private" },
                "text": text
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_command() {
        let parser = TelegramSlashCommandParser;
        assert_eq!(parser.parse(None, &text_update("/About")).as_deref(), Some("/about"));
        assert_eq!(parser.parse(None, &text_update("/start now")).as_deref(), Some("/start"));
        assert_eq!(parser.parse(None, &text_update("about")), None);
        assert_eq!(parser.parse(None, &Update::default()), None);
    }

    #[test]
    fn test_mentions() {
        let bot = TelegramBotConfiguration::new("b", "t").with_username("@my_bot");
        let parser = TelegramSlashCommandParser;

        assert_eq!(
            parser.parse(Some(&bot), &text_update("/help@My_Bot")).as_deref(),
            Some("/help")
        );
        assert_eq!(parser.parse(Some(&bot), &text_update("/help@other_bot")), None);
        assert_eq!(
            parser.parse(None, &text_update("/help@other_bot")).as_deref(),
            Some("/help")
        );
    }

    #[test]
    fn test_space_parser() {
        assert_eq!(TelegramSpaceParser.parse(&text_update("x")).unwrap().id, 100);
        assert!(TelegramSpaceParser.parse(&Update::default()).is_none());
    }
}
