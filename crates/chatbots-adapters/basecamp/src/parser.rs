//! Command and space extraction from Basecamp queries.

use chatbots_core::{SlashCommandParser, SpaceParser, parse_slash_command_for};

use crate::config::BasecampBotConfiguration;
use crate::model::{Campfire, Query};

/// Reads the slash command from the query's `command` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasecampSlashCommandParser;

impl SlashCommandParser<BasecampBotConfiguration, Query> for BasecampSlashCommandParser {
    fn parse(&self, bot: Option<&BasecampBotConfiguration>, query: &Query) -> Option<String> {
        parse_slash_command_for(&query.command, bot)
    }
}

/// Returns the Campfire a query was posted in.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasecampSpaceParser;

impl SpaceParser<Query, Campfire> for BasecampSpaceParser {
    fn parse(&self, query: &Query) -> Option<Campfire> {
        query
            .callback_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(Campfire::new)
    }
}
