//! # Basecamp Adapter
//!
//! Routes Basecamp chatbot queries through the chatbots dispatch engine.
//! Handlers answer with the text Basecamp posts back to the Campfire.
//!
//! ```rust,ignore
//! use chatbots_adapter_basecamp::*;
//!
//! let dispatcher = BasecampHandlerRegistry::new()
//!     .with(StaticCommandHandler::new("/about", loader))
//!     .with(UnknownCommandHandler)
//!     .build();
//!
//! let query = Query::from_json(&body)?;
//! let reply = dispatcher.dispatch(None, &query).await?;
//! ```

pub mod config;
pub mod handler;
pub mod model;
pub mod parser;

pub use config::{BasecampBotConfiguration, BasecampConfig, resolver};
pub use handler::StaticCommandHandler;
pub use model::{Campfire, Company, Creator, Query};
pub use parser::{BasecampSlashCommandParser, BasecampSpaceParser};

/// Name of the adapter's section in the chatbots configuration.
pub const ADAPTER_NAME: &str = "basecamp";

/// Dispatcher answering Basecamp queries with response text.
pub type BasecampDispatcher = chatbots_core::Dispatcher<BasecampBotConfiguration, Query, String>;

/// Registry building a [`BasecampDispatcher`].
pub type BasecampHandlerRegistry =
    chatbots_core::HandlerRegistry<BasecampBotConfiguration, Query, String>;
