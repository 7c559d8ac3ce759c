//! Configuration validation utilities.

use std::collections::HashSet;

use chatbots_core::TextResourceSettings;
use serde_json::Value;

use super::error::{ConfigError, ConfigResult};
use super::schema::{ChatbotsConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &ChatbotsConfig) -> ConfigResult<()> {
    validate_text_resources(&config.text_resources)?;
    validate_logging(&config.logging)?;
    for (adapter, section) in &config.adapters {
        validate_adapter_bots(adapter, section)?;
    }
    Ok(())
}

fn validate_text_resources(settings: &TextResourceSettings) -> ConfigResult<()> {
    if settings.folder.trim().is_empty() {
        return Err(ConfigError::validation(
            "text_resources.folder must not be blank",
        ));
    }

    if settings.extensions.is_empty() {
        return Err(ConfigError::validation(
            "text_resources.extensions must list at least one file kind",
        ));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = settings.extensions.iter().find(|ext| !seen.insert(**ext)) {
        return Err(ConfigError::validation(format!(
            "text_resources.extensions lists {dup:?} twice"
        )));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    for target in logging.filters.keys() {
        if target.is_empty() || target.contains(char::is_whitespace) {
            return Err(ConfigError::validation(format!(
                "Invalid log filter target: {target:?}"
            )));
        }
    }

    Ok(())
}

/// Checks the `bots` list of an adapter section: every bot needs a name and
/// names are unique within the adapter.
fn validate_adapter_bots(adapter: &str, section: &Value) -> ConfigResult<()> {
    let Some(bots) = section.get("bots") else {
        return Ok(());
    };
    let Some(bots) = bots.as_array() else {
        return Err(ConfigError::adapter(adapter, "`bots` must be a list"));
    };

    let mut seen = HashSet::new();
    for (index, bot) in bots.iter().enumerate() {
        let name = bot
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::missing_field(format!("adapters.{adapter}.bots[{index}].name"))
            })?;

        if !seen.insert(name) {
            return Err(ConfigError::DuplicateBotName {
                adapter: adapter.to_string(),
                name: name.to_string(),
            });
        }
    }

    Ok(())
}
