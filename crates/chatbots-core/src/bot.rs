//! Bot configuration and its resolution.
//!
//! A [`BotConfiguration`] describes a registered bot: its name, whether it is
//! enabled, and the platform-specific settings handlers may consult. The
//! configuration that applies to an inbound message is found by a
//! [`BotConfigurationResolver`], which parses the message's space and asks a
//! [`ConfigurationSource`] for the bot registered for it.
//!
//! Not finding a configuration is a normal outcome. Handlers receive
//! `Option<&B>` and must cope with `None`.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::space::SpaceParser;

/// The registered identity and settings of a bot.
pub trait BotConfiguration: Send + Sync + 'static {
    /// Unique name of the bot within its platform.
    fn name(&self) -> &str;

    /// Whether this bot is enabled. Disabled bots are never resolved.
    fn is_enabled(&self) -> bool {
        true
    }

    /// The bot's own handle, prefixed with `@` (e.g. `@micronautbot`).
    ///
    /// Used by slash-command parsing to recognise commands addressed to
    /// another bot in multi-bot chats.
    fn at_username(&self) -> Option<&str> {
        None
    }
}

/// Looks up the bot configuration registered for a space.
///
/// Any `Fn(&S) -> Option<B>` closure is a `ConfigurationSource`.
pub trait ConfigurationSource<S, B>: Send + Sync {
    /// Returns the configuration registered for `space`, if any.
    fn lookup(&self, space: &S) -> Option<B>;
}

impl<S, B, F> ConfigurationSource<S, B> for F
where
    F: Fn(&S) -> Option<B> + Send + Sync,
{
    fn lookup(&self, space: &S) -> Option<B> {
        self(space)
    }
}

type ServesFn<S, B> = Arc<dyn Fn(&B, &S) -> bool + Send + Sync>;

/// An in-memory [`ConfigurationSource`] over a fixed list of bots.
///
/// The first *enabled* bot for which `serves(bot, space)` holds is returned.
pub struct StaticConfigurationSource<S, B> {
    bots: Vec<B>,
    serves: ServesFn<S, B>,
}

impl<S, B> StaticConfigurationSource<S, B>
where
    B: BotConfiguration + Clone,
{
    /// Creates a source over `bots`, using `serves` to decide whether a bot
    /// is registered for a given space.
    pub fn new<F>(bots: impl IntoIterator<Item = B>, serves: F) -> Self
    where
        F: Fn(&B, &S) -> bool + Send + Sync + 'static,
    {
        Self {
            bots: bots.into_iter().collect(),
            serves: Arc::new(serves),
        }
    }

    /// Returns the configured bots, enabled or not.
    pub fn bots(&self) -> &[B] {
        &self.bots
    }
}

impl<S, B> ConfigurationSource<S, B> for StaticConfigurationSource<S, B>
where
    B: BotConfiguration + Clone,
{
    fn lookup(&self, space: &S) -> Option<B> {
        self.bots
            .iter()
            .filter(|bot| bot.is_enabled())
            .find(|bot| (self.serves)(bot, space))
            .cloned()
    }
}

impl<S, B> Clone for StaticConfigurationSource<S, B>
where
    B: Clone,
{
    fn clone(&self) -> Self {
        Self {
            bots: self.bots.clone(),
            serves: Arc::clone(&self.serves),
        }
    }
}

type ResolveFn<I, B> = Arc<dyn Fn(&I) -> Option<B> + Send + Sync>;

/// Resolves the bot configuration that applies to an inbound message.
///
/// The space type used for the lookup is erased at construction, so a
/// resolver is parameterised only by the message and configuration types.
pub struct BotConfigurationResolver<I, B> {
    resolve: ResolveFn<I, B>,
}

impl<I, B> BotConfigurationResolver<I, B>
where
    I: 'static,
    B: 'static,
{
    /// Creates a resolver that parses the message's space with `space_parser`
    /// and looks it up in `source`.
    pub fn new<S, P, C>(space_parser: P, source: C) -> Self
    where
        S: 'static,
        P: SpaceParser<I, S> + 'static,
        C: ConfigurationSource<S, B> + 'static,
    {
        Self {
            resolve: Arc::new(move |input: &I| {
                let Some(space) = space_parser.parse(input) else {
                    trace!("message has no space, skipping configuration lookup");
                    return None;
                };
                source.lookup(&space)
            }),
        }
    }

    /// Creates a resolver from a plain function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&I) -> Option<B> + Send + Sync + 'static,
    {
        Self {
            resolve: Arc::new(f),
        }
    }

    /// Returns the configuration for `input`, or `None` when the message has
    /// no space or no bot is registered for it.
    pub fn resolve(&self, input: &I) -> Option<B> {
        (self.resolve)(input)
    }
}

impl<I, B> Clone for BotConfigurationResolver<I, B> {
    fn clone(&self) -> Self {
        Self {
            resolve: Arc::clone(&self.resolve),
        }
    }
}

impl<I, B> fmt::Debug for BotConfigurationResolver<I, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfigurationResolver").finish_non_exhaustive()
    }
}
