//! Slash-command parsing.
//!
//! Chat platforms deliver commands as free-form text such as
//! `/About@MyBot extra words`. [`parse_slash_command`] reduces that to a
//! normalized token (`/about`) that handlers can compare against:
//!
//! - leading and trailing whitespace is ignored;
//! - the text must start with `/`, otherwise there is no command;
//! - only the first whitespace-delimited word is the command;
//! - an `@bot` mention suffix is stripped;
//! - the token is lower-cased.
//!
//! When the bot's own handle is known, a command explicitly addressed to a
//! *different* bot (`/about@OtherBot`) is not a command for this bot.

use crate::bot::BotConfiguration;

/// Prefix that marks the start of a command.
pub const COMMAND_PREFIX: char = '/';

/// Separator between a command and the bot it is addressed to.
pub const MENTION_SEPARATOR: char = '@';

/// Extracts a normalized command token from a platform message.
///
/// Implemented per platform: Telegram reads the message text, Basecamp the
/// query's `command` field.
pub trait SlashCommandParser<B, I>: Send + Sync {
    /// Returns the normalized command of `input`, e.g. `/about`.
    fn parse(&self, bot: Option<&B>, input: &I) -> Option<String>;
}

/// Parses the leading slash command of `text`.
///
/// `bot_username` is the bot's own handle, with or without the leading `@`.
///
/// ```
/// use chatbots_core::parse_slash_command;
///
/// assert_eq!(parse_slash_command("/About@MyBot", None).as_deref(), Some("/about"));
/// assert_eq!(parse_slash_command("  /help me ", None).as_deref(), Some("/help"));
/// assert_eq!(parse_slash_command("hello", None), None);
/// ```
pub fn parse_slash_command(text: &str, bot_username: Option<&str>) -> Option<String> {
    let token = text.split_whitespace().next()?;
    let token = token.strip_prefix(COMMAND_PREFIX)?;

    let name = match token.split_once(MENTION_SEPARATOR) {
        Some((name, mention)) => {
            if !mention.is_empty() && !addressed_to(mention, bot_username) {
                return None;
            }
            name
        }
        None => token,
    };

    if name.is_empty() {
        return None;
    }

    Some(format!("{COMMAND_PREFIX}{}", name.to_lowercase()))
}

/// Parses a slash command using the handle of `bot`, if any.
pub fn parse_slash_command_for<B: BotConfiguration>(text: &str, bot: Option<&B>) -> Option<String> {
    parse_slash_command(text, bot.and_then(|b| b.at_username()))
}

/// Normalizes a registered command name: trims it, adds the leading `/` if
/// missing, and lower-cases it.
pub fn normalize_command(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_prefix(COMMAND_PREFIX).unwrap_or(name);
    format!("{COMMAND_PREFIX}{}", name.to_lowercase())
}

/// Compares a parsed command token with a registered command name,
/// case-insensitively. `name` may omit the leading `/`.
pub fn command_matches(token: &str, name: &str) -> bool {
    normalize_command(token) == normalize_command(name)
}

fn addressed_to(mention: &str, bot_username: Option<&str>) -> bool {
    match bot_username {
        Some(username) => {
            let username = username.trim().trim_start_matches(MENTION_SEPARATOR);
            username.is_empty() || username.eq_ignore_ascii_case(mention)
        }
        None => true,
    }
}
