//! Chatbots Runtime - configuration and logging for chatbots deployments.
//!
//! This crate provides:
//! - Layered configuration loading ([`ConfigLoader`]) from files and
//!   `CHATBOTS_*` environment variables
//! - Per-adapter configuration sections ([`ChatbotsConfig::adapter_config`])
//! - Logging setup ([`LoggingBuilder`], [`logging::init_from_config`])
//!
//! ```rust,ignore
//! use chatbots_runtime::{ChatbotsConfig, config::validate_config, logging};
//!
//! let config = ChatbotsConfig::load()?;
//! validate_config(&config)?;
//! logging::init_from_config(&config.logging);
//!
//! let telegram: TelegramConfig = config.adapter_config("telegram")?;
//! let loader = config.text_resource_loader();
//! ```

pub mod config;
pub mod logging;

pub use config::{
    ChatbotsConfig, ConfigError, ConfigLoader, ConfigResult, LoggingConfig, load_config,
    validate_config,
};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude with the common logging macros.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
