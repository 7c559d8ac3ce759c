//! Configuration schema definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [text_resources]
//! folder = "botcommands"
//! extensions = ["markdown", "html"]
//!
//! [logging]
//! level = "info"
//! format = "compact"
//!
//! [logging.filters]
//! chatbots_core = "debug"
//!
//! [[adapters.telegram.bots]]
//! name = "helpdesk"
//! token = "123:abc"
//! at_username = "@helpdesk_bot"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chatbots_core::{DefaultTextResourceLoader, TextResourceLoader, TextResourceSettings};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotsConfig {
    /// Master switch; a disabled deployment answers no webhook.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Where static command texts are read from.
    #[serde(default)]
    pub text_resources: TextResourceSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Adapter sections keyed by adapter name (`telegram`, `basecamp`, ...).
    #[serde(default)]
    pub adapters: BTreeMap<String, serde_json::Value>,
}

impl Default for ChatbotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text_resources: TextResourceSettings::default(),
            logging: LoggingConfig::default(),
            adapters: BTreeMap::new(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl ChatbotsConfig {
    /// Loads the configuration from the default locations.
    pub fn load() -> ConfigResult<Self> {
        super::loader::load_config()
    }

    /// Deserializes the section of adapter `name`.
    ///
    /// A missing section yields `T::default()`.
    pub fn adapter_config<T>(&self, name: &str) -> ConfigResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.adapters.get(name) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| ConfigError::adapter(name, e.to_string())),
            None => Ok(T::default()),
        }
    }

    /// Returns `true` if a section for adapter `name` is present.
    pub fn has_adapter(&self, name: &str) -> bool {
        self.adapters.contains_key(name)
    }

    /// Builds a file-based loader for static command texts, resolved against
    /// the working directory.
    pub fn text_resource_loader(&self) -> Arc<dyn TextResourceLoader> {
        Arc::new(DefaultTextResourceLoader::new(self.text_resources.clone()))
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base level for every target.
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file, required when `output = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// How often the log file rolls over.
    #[serde(default)]
    pub rotation: LogRotation,

    /// Rolled files to keep; `0` keeps all.
    #[serde(default = "default_max_files")]
    pub max_files: u32,

    /// Per-target levels, e.g. `chatbots_core = "debug"`.
    #[serde(default)]
    pub filters: BTreeMap<String, LogLevel>,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    #[serde(default)]
    pub thread_ids: bool,

    /// Include file names and line numbers.
    #[serde(default)]
    pub file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
            rotation: LogRotation::default(),
            max_files: default_max_files(),
            filters: BTreeMap::new(),
            span_events: SpanEventConfig::default(),
            thread_ids: false,
            file_location: false,
        }
    }
}

fn default_max_files() -> u32 {
    5
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line format of log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Newline-delimited JSON; needs the `json-log` feature.
    Json,
}

/// Where log records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Rollover period of the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Minutely,
    Hourly,
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanEventConfig {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}
