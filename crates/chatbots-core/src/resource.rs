//! Static text responses for bot commands.
//!
//! Commands such as `/about` or `/help` usually answer with fixed text. A
//! [`TextResourceLoader`] maps a command to that text. The
//! [`DefaultTextResourceLoader`] reads it from files named after the command
//! in a configured folder:
//!
//! ```text
//! botcommands/
//! ├── about.md      ← answers /about, rendered as Markdown
//! └── help.html     ← answers /help, rendered as HTML
//! ```
//!
//! Extensions are tried in the configured order and the first non-empty file
//! wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::command::COMMAND_PREFIX;

/// Default folder searched for command text files.
pub const DEFAULT_FOLDER: &str = "botcommands";

/// Kind of a static command file, which determines how clients render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileExtension {
    /// Markdown (`.md`, `.markdown`).
    Markdown,
    /// HTML (`.html`, `.htm`).
    Html,
    /// Plain text (`.txt`).
    Text,
}

impl FileExtension {
    /// All kinds, in default search order.
    pub const ALL: [FileExtension; 3] = [Self::Markdown, Self::Html, Self::Text];

    /// File name extensions of this kind, in search order.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Markdown => &["md", "markdown"],
            Self::Html => &["html", "htm"],
            Self::Text => &["txt"],
        }
    }
}

/// A static response for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    /// Kind of the file the text came from.
    pub extension: FileExtension,
    /// The response text.
    pub text: String,
}

impl CommandResponse {
    /// Creates a command response.
    pub fn new(extension: FileExtension, text: impl Into<String>) -> Self {
        Self {
            extension,
            text: text.into(),
        }
    }
}

/// Composes the static response for a command.
pub trait TextResourceLoader: Send + Sync {
    /// Returns the static response for `command` (e.g. `/about` or `about`).
    fn compose_command_response(&self, command: &str) -> Option<CommandResponse>;
}

impl<T: TextResourceLoader + ?Sized> TextResourceLoader for Arc<T> {
    fn compose_command_response(&self, command: &str) -> Option<CommandResponse> {
        (**self).compose_command_response(command)
    }
}

/// Settings of the [`DefaultTextResourceLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResourceSettings {
    /// Folder holding the command files.
    #[serde(default = "default_folder")]
    pub folder: String,

    /// File kinds to look for, in order.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<FileExtension>,
}

impl Default for TextResourceSettings {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            extensions: default_extensions(),
        }
    }
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_extensions() -> Vec<FileExtension> {
    FileExtension::ALL.to_vec()
}

/// Loads command responses from files, caching every lookup.
///
/// For the command `/about` and the default settings, the loader tries
/// `botcommands/about.md`, `botcommands/about.markdown`,
/// `botcommands/about.html`, `botcommands/about.htm` and
/// `botcommands/about.txt`, relative to its root directory.
#[derive(Debug)]
pub struct DefaultTextResourceLoader {
    root: PathBuf,
    settings: TextResourceSettings,
    /// Relative path → file content; empty when the file is missing.
    cache: RwLock<HashMap<String, Arc<str>>>,
}

impl DefaultTextResourceLoader {
    /// Creates a loader resolving the folder against the working directory.
    pub fn new(settings: TextResourceSettings) -> Self {
        Self::with_root(".", settings)
    }

    /// Creates a loader resolving the folder against `root`.
    pub fn with_root(root: impl AsRef<Path>, settings: TextResourceSettings) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            settings,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the loader settings.
    pub fn settings(&self) -> &TextResourceSettings {
        &self.settings
    }

    fn cached_text(&self, path: &str) -> Arc<str> {
        if let Some(text) = self.cache.read().get(path) {
            return Arc::clone(text);
        }

        let text: Arc<str> = match std::fs::read_to_string(self.root.join(path)) {
            Ok(text) => {
                debug!(path, "Loaded command text");
                text.into()
            }
            Err(e) => {
                trace!(path, error = %e, "Command text not available");
                Arc::from("")
            }
        };

        self.cache
            .write()
            .entry(path.to_string())
            .or_insert(text)
            .clone()
    }
}

impl TextResourceLoader for DefaultTextResourceLoader {
    fn compose_command_response(&self, command: &str) -> Option<CommandResponse> {
        let name = command_file_stem(command)?;
        let folder = normalize_folder(&self.settings.folder);

        for kind in &self.settings.extensions {
            for ext in kind.extensions() {
                let path = format!("{folder}{name}.{ext}");
                let text = self.cached_text(&path);
                if !text.is_empty() {
                    return Some(CommandResponse::new(*kind, text.as_ref()));
                }
            }
        }

        None
    }
}

/// An in-memory [`TextResourceLoader`].
#[derive(Debug, Clone, Default)]
pub struct StaticTextResources {
    responses: HashMap<String, CommandResponse>,
}

impl StaticTextResources {
    /// Creates an empty set of responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the response for `command` (builder pattern).
    pub fn with(
        mut self,
        command: &str,
        extension: FileExtension,
        text: impl Into<String>,
    ) -> Self {
        self.insert(command, CommandResponse::new(extension, text));
        self
    }

    /// Adds the response for `command`.
    pub fn insert(&mut self, command: &str, response: CommandResponse) {
        if let Some(name) = command_file_stem(command) {
            self.responses.insert(name.to_lowercase(), response);
        }
    }
}

impl TextResourceLoader for StaticTextResources {
    fn compose_command_response(&self, command: &str) -> Option<CommandResponse> {
        let name = command_file_stem(command)?;
        self.responses.get(&name.to_lowercase()).cloned()
    }
}

/// Strips the leading `/` and rejects names that could escape the folder.
fn command_file_stem(command: &str) -> Option<&str> {
    let command = command.trim();
    let name = command.strip_prefix(COMMAND_PREFIX).unwrap_or(command);
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return None;
    }
    Some(name)
}

/// Converts backslashes, drops a leading `/` and ensures a trailing `/`.
fn normalize_folder(folder: &str) -> String {
    let folder = folder.replace('\\', "/");
    let folder = folder.strip_prefix('/').unwrap_or(&folder);
    if folder.is_empty() || folder.ends_with('/') {
        folder.to_string()
    } else {
        format!("{folder}/")
    }
}
