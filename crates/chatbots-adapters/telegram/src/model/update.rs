//! Inbound webhook payloads.
//!
//! Telegram posts one [`Update`] per request. At most one of its optional
//! parts is present:
//!
//! ```text
//! Update { update_id }
//! ├── message              ← new incoming message
//! ├── edited_message       ← a known message was edited
//! ├── channel_post         ← new post in a channel
//! ├── edited_channel_post
//! └── callback_query       ← inline keyboard button press
//!     └── message          ← the message carrying the keyboard (optional)
//! ```

use chatbots_core::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Update
// ============================================================================

/// An incoming update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// The update's unique identifier.
    pub update_id: i64,

    /// New incoming message of any kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// New version of a message that was edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,

    /// New incoming channel post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,

    /// New version of a channel post that was edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,

    /// New incoming callback query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// Decodes an update from a webhook request body.
    pub fn from_json(json: &str) -> ParseResult<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::json("telegram update", e))
    }

    /// Decodes an update from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> ParseResult<Self> {
        serde_json::from_value(value).map_err(|e| ParseError::json("telegram update", e))
    }

    /// Returns the message this update is about, whichever part carries it.
    pub fn effective_message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .or(self.edited_message.as_ref())
            .or(self.channel_post.as_ref())
            .or(self.edited_channel_post.as_ref())
            .or_else(|| self.callback_query.as_ref()?.message.as_ref())
    }

    /// Returns the chat this update belongs to.
    pub fn chat(&self) -> Option<&Chat> {
        self.effective_message().map(|m| &m.chat)
    }

    /// Returns the text of a newly received message.
    ///
    /// Edits and callback queries yield `None`, so a handler reacting to text
    /// does not answer the same message twice.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref()?.text.as_deref()
    }
}

// ============================================================================
// Message
// ============================================================================

/// A message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier inside the chat.
    pub message_id: i64,

    /// Sender; absent for messages sent to channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,

    /// Date the message was sent, as a Unix timestamp.
    #[serde(default)]
    pub date: i64,

    /// Conversation the message belongs to.
    pub chat: Chat,

    /// Text of a text message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique identifier of the chat.
    pub id: i64,

    /// Kind of the chat.
    #[serde(rename = "type")]
    pub kind: ChatType,

    /// Title, for groups, supergroups and channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Username, for private chats and some public chats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// First name of the other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last name of the other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Chat {
    /// Creates a chat with only an id and a kind.
    pub fn new(id: i64, kind: ChatType) -> Self {
        Self {
            id,
            kind,
            title: None,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

/// Kind of a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// A Telegram user or bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(default)]
    pub is_bot: bool,

    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// IETF language tag of the user's language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// A press on an inline keyboard button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,

    pub from: User,

    /// Message with the button; absent if the message is too old.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default)]
    pub chat_instance: String,

    /// Data associated with the button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}
