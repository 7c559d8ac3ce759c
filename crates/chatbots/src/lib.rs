//! # Chatbots
//!
//! Route chat platform webhooks through an ordered chain of bot handlers.
//!
//! A platform adapter decodes the inbound payload, the [`Dispatcher`] asks
//! each [`Handler`] in ascending order whether it can answer, and the first
//! match produces the outgoing response:
//!
//! ```text
//! ┌──────────────┐     ┌────────────┐     ┌───────────────────────────────┐
//! │ Telegram     │────▶│ Dispatcher │────▶│ StaticCommandHandler (-10)    │
//! │ Update       │     │            │────▶│ HelloWorldHandler    (0)      │
//! └──────────────┘     └────────────┘────▶│ UnknownCommandHandler (last)  │
//!                                         └───────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chatbots::prelude::*;
//! use chatbots::telegram::{self, SendMethod, Update, TelegramBotConfiguration};
//!
//! struct HelloWorldHandler;
//!
//! #[async_trait]
//! impl Handler<TelegramBotConfiguration, Update, SendMethod> for HelloWorldHandler {
//!     fn can_handle(&self, _bot: Option<&TelegramBotConfiguration>, update: &Update) -> bool {
//!         update.text().is_some_and(|t| t.contains("hello"))
//!     }
//!
//!     async fn handle(
//!         &self,
//!         _bot: Option<&TelegramBotConfiguration>,
//!         update: &Update,
//!     ) -> HandlerResult<SendMethod> {
//!         Ok(telegram::compose_send_message(&telegram::TelegramSpaceParser, update, "Hello World", None)
//!             .map(SendMethod::Message))
//!     }
//! }
//!
//! let config = chatbots::runtime::ChatbotsConfig::load()?;
//! let telegram_config: telegram::TelegramConfig = config.adapter_config("telegram")?;
//!
//! let dispatcher = telegram::TelegramHandlerRegistry::new()
//!     .with(telegram::StaticCommandHandler::new("/about", config.text_resource_loader()))
//!     .with(HelloWorldHandler)
//!     .with_resolver(telegram_config.resolver())
//!     .build();
//!
//! let reply = dispatcher.dispatch(None, &Update::from_json(body)?).await?;
//! ```
//!
//! ## Features
//!
//! - `runtime` *(default)*: configuration loading and logging setup
//! - `telegram` *(default)*: Telegram adapter
//! - `basecamp` *(default)*: Basecamp adapter
//! - `toml-config` *(default)* / `yaml-config`: configuration file formats
//! - `json-log`: JSON log output

pub use chatbots_core as core;
pub use chatbots_core::{
    BotConfiguration, Dispatcher, Handler, HandlerRegistry, HandlerResult, SlashCommandParser,
    SpaceParser, TextResourceLoader,
};

#[cfg(feature = "runtime")]
pub use chatbots_runtime as runtime;

#[cfg(feature = "telegram")]
pub use chatbots_adapter_telegram as telegram;

#[cfg(feature = "basecamp")]
pub use chatbots_adapter_basecamp as basecamp;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use chatbots::prelude::*;
/// ```
pub mod prelude {
    pub use chatbots_core::prelude::*;

    // Handlers are implemented with `#[async_trait]`.
    pub use chatbots_core::async_trait;

    #[cfg(feature = "runtime")]
    pub use chatbots_runtime::{ChatbotsConfig, ConfigLoader, LoggingBuilder};
}
