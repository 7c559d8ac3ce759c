//! # Chatbots Core
//!
//! The dispatch engine of the chatbots integration library.
//!
//! A platform adapter decodes an inbound webhook payload (a Telegram `Update`,
//! a Basecamp `Query`, ...) and hands it to a [`Dispatcher`]. The dispatcher
//! walks an ordered chain of [`Handler`]s and lets the first one that can
//! handle the message produce the outgoing response.
//!
//! ```text
//! ┌─────────────┐     ┌────────────┐     ┌─────────────────────────┐
//! │   Adapter   │────▶│ Dispatcher │────▶│ Handler  (order -10)    │
//! │ (Telegram)  │     │            │────▶│ Handler  (order 0)      │
//! └─────────────┘     └────────────┘────▶│ Catch-all (lowest prec.)│
//!                                        └─────────────────────────┘
//! ```
//!
//! Building blocks:
//!
//! - **Parsing**: [`SlashCommandParser`] and [`SpaceParser`] extract routable
//!   tokens from heterogeneous payloads. Absence is modelled as `None`.
//! - **Configuration**: [`BotConfigurationResolver`] looks up the
//!   [`BotConfiguration`] that applies to a message.
//! - **Handlers**: the [`Handler`] trait and the [`HandlerRegistry`] builder
//!   that freezes registered handlers into a [`Dispatcher`].
//! - **Text resources**: [`TextResourceLoader`] for static command answers
//!   such as `/about` or `/help`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chatbots_core::prelude::*;
//!
//! let dispatcher = HandlerRegistry::<MyBot, String, String>::new()
//!     .with(
//!         handler_fn("hello")
//!             .check(|_bot, text: &String| text.contains("hello"))
//!             .respond(|_bot, _text| Ok(Some("Hello World".to_string()))),
//!     )
//!     .build();
//!
//! let reply = dispatcher.dispatch(None, &"hello there".to_string()).await?;
//! ```

pub mod bot;
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod registry;
pub mod resource;
pub mod space;

pub use bot::{
    BotConfiguration, BotConfigurationResolver, ConfigurationSource, StaticConfigurationSource,
};
pub use command::{
    COMMAND_PREFIX, SlashCommandParser, command_matches, normalize_command, parse_slash_command,
    parse_slash_command_for,
};
pub use dispatcher::{DispatchRequest, Dispatcher};
pub use error::{BoxError, ParseError, ParseResult};
pub use handler::{
    BoxedHandler, DEFAULT_ORDER, FnHandler, HIGHEST_PRECEDENCE, Handler, HandlerResult,
    LOWEST_PRECEDENCE, STATIC_COMMAND_ORDER, handler_fn,
};
pub use registry::HandlerRegistry;
pub use resource::{
    CommandResponse, DEFAULT_FOLDER, DefaultTextResourceLoader, FileExtension, StaticTextResources,
    TextResourceLoader, TextResourceSettings,
};
pub use space::SpaceParser;

pub use async_trait::async_trait;

/// Prelude for common imports.
pub mod prelude {
    pub use super::bot::{BotConfiguration, BotConfigurationResolver, ConfigurationSource};
    pub use super::command::{SlashCommandParser, command_matches, parse_slash_command};
    pub use super::dispatcher::Dispatcher;
    pub use super::error::BoxError;
    pub use super::handler::{
        DEFAULT_ORDER, HIGHEST_PRECEDENCE, Handler, HandlerResult, LOWEST_PRECEDENCE, handler_fn,
    };
    pub use super::registry::HandlerRegistry;
    pub use super::resource::{CommandResponse, FileExtension, TextResourceLoader};
    pub use super::space::SpaceParser;
}
