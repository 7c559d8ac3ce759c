//! Basecamp chatbot payloads.
//!
//! Basecamp posts a [`Query`] whenever someone addresses the bot in a
//! Campfire. The bot answers either in the response body (plain text or
//! HTML) or later by posting to the query's callback URL.
//!
//! ```json
//! {
//!   "command": "/about",
//!   "callback_url": "https://3.basecamp.com/195539477/integrations/2uH9aHLEVhp9hdCEXQ3SnjCf/buckets/2085958500/chats/9007199254741045/lines",
//!   "creator": { "id": 1049715914, "name": "Victor Cooper", "company": { "id": 1033447817, "name": "Honcho Design" } }
//! }
//! ```

use chatbots_core::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};

/// A query addressed to the bot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Text typed after the bot's name.
    #[serde(default)]
    pub command: String,

    /// URL the bot may post follow-up lines to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// Person who wrote the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
}

impl Query {
    /// Creates a query with only a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// Sets the callback URL.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    /// Decodes a query from a webhook request body.
    pub fn from_json(json: &str) -> ParseResult<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::json("basecamp query", e))
    }

    /// Decodes a query from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> ParseResult<Self> {
        serde_json::from_value(value).map_err(|e| ParseError::json("basecamp query", e))
    }
}

/// A Basecamp person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachable_sgid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// `User`, `Client`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personable_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Company a [`Creator`] belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

/// A Campfire chat, identified by the callback URL of its queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Campfire {
    pub callback_url: String,
}

impl Campfire {
    /// Creates a Campfire from a query's callback URL.
    pub fn new(callback_url: impl Into<String>) -> Self {
        Self {
            callback_url: callback_url.into(),
        }
    }

    /// Returns `true` if the callback URL is `prefix` or lies below it.
    ///
    /// Matching stops at path segment boundaries: `.../chats/9` covers
    /// `.../chats/9/lines` but not `.../chats/91/lines`.
    pub fn is_under(&self, prefix: &str) -> bool {
        let prefix = prefix.trim().trim_end_matches('/');
        if prefix.is_empty() {
            return false;
        }
        match self.callback_url.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Basecamp account id, the first path segment of the callback URL.
    pub fn account_id(&self) -> Option<u64> {
        self.path_segments().next()?.parse().ok()
    }

    /// Project (bucket) id.
    pub fn bucket_id(&self) -> Option<u64> {
        self.segment_after("buckets")
    }

    /// Chat id inside the project.
    pub fn chat_id(&self) -> Option<u64> {
        self.segment_after("chats")
    }

    fn path_segments(&self) -> impl Iterator<Item = &str> {
        let path = self
            .callback_url
            .split_once("://")
            .map_or(self.callback_url.as_str(), |(_, rest)| rest);
        // Skip the host.
        path.split('/').skip(1).filter(|s| !s.is_empty())
    }

    fn segment_after(&self, name: &str) -> Option<u64> {
        let mut segments = self.path_segments();
        segments.find(|s| *s == name)?;
        segments.next()?.parse().ok()
    }
}
