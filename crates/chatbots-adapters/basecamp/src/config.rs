//! Configuration of Basecamp bots.
//!
//! # Example Configuration
//!
//! ```yaml
//! adapters:
//!   basecamp:
//!     bots:
//!       - name: helpdesk
//!         campfires:
//!           - https://3.basecamp.com/195539477/integrations/2uH9aHLEVhp9hdCEXQ3SnjCf/buckets/2085958500/chats/9007199254741045
//! ```

use chatbots_core::{BotConfiguration, BotConfigurationResolver, StaticConfigurationSource};
use serde::{Deserialize, Serialize};

use crate::model::{Campfire, Query};
use crate::parser::BasecampSpaceParser;

/// Basecamp adapter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BasecampConfig {
    pub bots: Vec<BasecampBotConfiguration>,
}

impl BasecampConfig {
    /// Returns only the enabled bots.
    pub fn enabled_bots(&self) -> impl Iterator<Item = &BasecampBotConfiguration> {
        self.bots.iter().filter(|b| b.enabled)
    }

    /// Returns the bot with the given name.
    pub fn bot(&self, name: &str) -> Option<&BasecampBotConfiguration> {
        self.bots.iter().find(|b| b.name == name)
    }

    /// Builds a resolver finding the bot that serves a query's Campfire.
    pub fn resolver(&self) -> BotConfigurationResolver<Query, BasecampBotConfiguration> {
        resolver(self)
    }
}

/// Settings of a single Basecamp bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasecampBotConfiguration {
    pub name: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Callback URL prefixes of the Campfires the bot serves. An empty list
    /// serves every Campfire.
    #[serde(default)]
    pub campfires: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

impl BasecampBotConfiguration {
    /// Creates an enabled bot serving every Campfire.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            campfires: Vec::new(),
        }
    }

    /// Restricts the bot to Campfires whose callback URL is `prefix` or a
    /// path below it.
    pub fn with_campfire(mut self, prefix: impl Into<String>) -> Self {
        self.campfires.push(prefix.into());
        self
    }

    /// Returns `true` if the bot is registered for `campfire`.
    pub fn serves_campfire(&self, campfire: &Campfire) -> bool {
        self.campfires.is_empty()
            || self
                .campfires
                .iter()
                .any(|prefix| campfire.is_under(prefix))
    }
}

impl BotConfiguration for BasecampBotConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Builds a resolver finding the first enabled bot that serves a query's
/// Campfire.
pub fn resolver(
    config: &BasecampConfig,
) -> BotConfigurationResolver<Query, BasecampBotConfiguration> {
    let source = StaticConfigurationSource::new(
        config.bots.clone(),
        |bot: &BasecampBotConfiguration, campfire: &Campfire| bot.serves_campfire(campfire),
    );
    BotConfigurationResolver::new(BasecampSpaceParser, source)
}
