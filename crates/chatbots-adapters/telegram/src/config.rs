//! Configuration of Telegram bots.
//!
//! Loaded from the `adapters.telegram` section of the chatbots configuration.
//!
//! # Example Configuration
//!
//! ```toml
//! [[adapters.telegram.bots]]
//! name = "helpdesk"
//! token = "${TELEGRAM_TOKEN}"
//! at_username = "@helpdesk_bot"
//! chats = [100, -1001234]
//!
//! [adapters.telegram.bots.commands]
//! about = "What this bot does"
//! ```

use std::collections::BTreeMap;

use chatbots_core::{
    BotConfiguration, BotConfigurationResolver, COMMAND_PREFIX, StaticConfigurationSource,
};
use serde::{Deserialize, Serialize};

use crate::model::{BotCommand, Chat, SetMyCommands, Update};
use crate::parser::TelegramSpaceParser;

/// Telegram adapter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Configured bots.
    pub bots: Vec<TelegramBotConfiguration>,
}

impl TelegramConfig {
    /// Returns only the enabled bots.
    pub fn enabled_bots(&self) -> impl Iterator<Item = &TelegramBotConfiguration> {
        self.bots.iter().filter(|b| b.enabled)
    }

    /// Returns the bot with the given name.
    pub fn bot(&self, name: &str) -> Option<&TelegramBotConfiguration> {
        self.bots.iter().find(|b| b.name == name)
    }

    /// Builds a resolver finding the bot that serves an update's chat.
    pub fn resolver(&self) -> BotConfigurationResolver<Update, TelegramBotConfiguration> {
        resolver(self)
    }
}

/// Settings of a single Telegram bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramBotConfiguration {
    /// Unique name of the bot in this deployment.
    pub name: String,

    /// Bot API token issued by BotFather.
    pub token: String,

    /// The bot's username, with or without the leading `@`.
    #[serde(default)]
    pub at_username: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Chats the bot serves. An empty list serves every chat.
    #[serde(default)]
    pub chats: Vec<i64>,

    /// Command descriptions shown in the client's command menu, keyed by
    /// command name with or without the leading `/`.
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
}

fn default_enabled() -> bool {
    true
}

impl TelegramBotConfiguration {
    /// Creates an enabled bot serving every chat.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            at_username: String::new(),
            enabled: true,
            chats: Vec::new(),
            commands: BTreeMap::new(),
        }
    }

    /// Sets the bot's username.
    pub fn with_username(mut self, at_username: impl Into<String>) -> Self {
        self.at_username = at_username.into();
        self
    }

    /// Restricts the bot to a chat.
    pub fn with_chat(mut self, chat_id: i64) -> Self {
        self.chats.push(chat_id);
        self
    }

    /// Returns `true` if the bot is registered for `chat`.
    pub fn serves_chat(&self, chat: &Chat) -> bool {
        self.chats.is_empty() || self.chats.contains(&chat.id)
    }

    /// Adds a command to the bot's command menu.
    pub fn with_command(mut self, command: &str, description: impl Into<String>) -> Self {
        self.commands.insert(command.to_string(), description.into());
        self
    }

    /// Builds the `setMyCommands` call publishing the configured command
    /// menu, sorted by name. Entries with a blank name are skipped and
    /// names differing only in case or a leading `/` appear once.
    pub fn set_my_commands(&self) -> SetMyCommands {
        let mut commands: Vec<BotCommand> = self
            .commands
            .iter()
            .filter_map(|(name, description)| {
                let name = name.trim();
                let name = name.strip_prefix(COMMAND_PREFIX).unwrap_or(name);
                (!name.is_empty())
                    .then(|| BotCommand::new(name.to_lowercase(), description.trim()))
            })
            .collect();
        commands.sort_by(|a, b| a.command.cmp(&b.command));
        commands.dedup_by(|a, b| a.command == b.command);
        SetMyCommands { commands }
    }
}

impl BotConfiguration for TelegramBotConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn at_username(&self) -> Option<&str> {
        Some(self.at_username.as_str()).filter(|u| !u.is_empty())
    }
}

/// Builds a resolver finding the first enabled bot that serves an update's
/// chat.
pub fn resolver(
    config: &TelegramConfig,
) -> BotConfigurationResolver<Update, TelegramBotConfiguration> {
    let source = StaticConfigurationSource::new(
        config.bots.clone(),
        |bot: &TelegramBotConfiguration, chat: &Chat| bot.serves_chat(chat),
    );
    BotConfigurationResolver::new(TelegramSpaceParser, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChatType;
    use serde_json::json;

    const YAML: &str = r#"
bots:
  - name: helpdesk
    token: "123:abc"
    at_username: "@helpdesk_bot"
    chats: [100]
    commands:
      about: What this bot does
  - name: dormant
    token: "456:def"
    enabled: false
"#;

    fn update_in(chat_id: i64) -> Update {
        Update::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "chat": { "id": chat_id, "type": "group" },
                "text": "hi"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_yaml() {
        let config: TelegramConfig = serde_yaml::from_str(YAML).unwrap();

        assert_eq!(config.bots.len(), 2);
        assert_eq!(config.enabled_bots().count(), 1);

        let bot = config.bot("helpdesk").unwrap();
        assert_eq!(bot.at_username(), Some("@helpdesk_bot"));
        assert_eq!(
            bot.commands.get("about").map(String::as_str),
            Some("What this bot does")
        );

        let dormant = config.bot("dormant").unwrap();
        assert!(!dormant.is_enabled());
        assert_eq!(dormant.at_username(), None);
    }

    #[test]
    fn test_set_my_commands_from_config() {
        let config: TelegramConfig = serde_yaml::from_str(YAML).unwrap();
        let menu = config.bot("helpdesk").unwrap().set_my_commands();
        assert_eq!(
            menu.commands,
            vec![BotCommand::new("about", "What this bot does")]
        );

        let bot = TelegramBotConfiguration::new("b", "t")
            .with_command("/Help", "How to use me")
            .with_command("about", "About ")
            .with_command("/", "ignored")
            .with_command("/ABOUT", "About ");
        assert_eq!(
            bot.set_my_commands().commands,
            vec![
                BotCommand::new("about", "About"),
                BotCommand::new("help", "How to use me"),
            ]
        );
        assert!(
            TelegramBotConfiguration::new("b", "t")
                .set_my_commands()
                .commands
                .is_empty()
        );
    }

    #[test]
    fn test_defaults() {
        let config: TelegramConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.bots.is_empty());

        let bot = TelegramBotConfiguration::new("b", "t");
        assert!(bot.is_enabled());
        assert!(bot.serves_chat(&Chat::new(1, ChatType::Private)));
    }

    #[test]
    fn test_resolver_by_chat() {
        let disabled = TelegramBotConfiguration {
            enabled: false,
            ..TelegramBotConfiguration::new("disabled", "t0").with_chat(7)
        };
        let config = TelegramConfig {
            bots: vec![
                disabled,
                TelegramBotConfiguration::new("seven", "t1").with_chat(7),
                TelegramBotConfiguration::new("eight", "t2").with_chat(8),
            ],
        };

        let resolver = config.resolver();
        assert_eq!(resolver.resolve(&update_in(7)).unwrap().name, "seven");
        assert_eq!(resolver.resolve(&update_in(8)).unwrap().name, "eight");
        assert!(resolver.resolve(&update_in(9)).is_none());
        assert!(resolver.resolve(&Update::default()).is_none());
    }
}
