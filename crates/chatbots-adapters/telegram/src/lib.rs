//! # Telegram Adapter
//!
//! Routes Telegram webhook updates through the chatbots dispatch engine.
//!
//! The adapter provides:
//!
//! - [`model`]: serde types for [`Update`] payloads and [`SendMethod`]
//!   responses
//! - [`TelegramSlashCommandParser`] and [`TelegramSpaceParser`]
//! - [`TelegramBotConfiguration`] and a chat-based [`resolver`]
//! - [`StaticCommandHandler`] answering commands such as `/about` from text
//!   files
//!
//! ## Example
//!
//! ```rust,ignore
//! use chatbots_adapter_telegram::*;
//!
//! let dispatcher = TelegramHandlerRegistry::new()
//!     .with(StaticCommandHandler::new("/about", loader.clone()))
//!     .with(HelloWorldHandler)
//!     .with_resolver(resolver(&config))
//!     .build();
//!
//! let update = Update::from_json(&body)?;
//! if let Some(method) = dispatcher.dispatch(None, &update).await? {
//!     return Ok(serde_json::to_string(&method)?);
//! }
//! ```

pub mod config;
pub mod handler;
pub mod model;
pub mod parser;
pub mod reply;

pub use config::{TelegramBotConfiguration, TelegramConfig, resolver};
pub use handler::StaticCommandHandler;
pub use model::{
    BotCommand, CallbackQuery, Chat, ChatAction, ChatId, ChatType, Message, ParseMode,
    SendChatAction, SendMessage, SendMethod, SetMyCommands, Update, User,
};
pub use parser::{TelegramSlashCommandParser, TelegramSpaceParser};
pub use reply::{compose_send_message, parse_mode_of};

/// Name of the adapter's section in the chatbots configuration.
pub const ADAPTER_NAME: &str = "telegram";

/// Dispatcher answering Telegram updates with Bot API methods.
pub type TelegramDispatcher =
    chatbots_core::Dispatcher<TelegramBotConfiguration, Update, SendMethod>;

/// Registry building a [`TelegramDispatcher`].
pub type TelegramHandlerRegistry =
    chatbots_core::HandlerRegistry<TelegramBotConfiguration, Update, SendMethod>;
