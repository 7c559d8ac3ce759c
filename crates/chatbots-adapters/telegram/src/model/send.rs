//! Outgoing Bot API methods.
//!
//! A webhook may answer an update by returning a method call in the response
//! body. The call is a JSON object whose `method` field names the Bot API
//! method and whose other fields are its parameters:
//!
//! ```json
//! { "method": "sendMessage", "chat_id": 100, "text": "Hello World" }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Bot API method returned as the webhook response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum SendMethod {
    /// `sendMessage`
    #[serde(rename = "sendMessage")]
    Message(SendMessage),

    /// `sendChatAction`
    #[serde(rename = "sendChatAction")]
    ChatAction(SendChatAction),

    /// `setMyCommands`
    #[serde(rename = "setMyCommands")]
    MyCommands(SetMyCommands),
}

impl SendMethod {
    /// Returns the Bot API method name.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Message(_) => "sendMessage",
            Self::ChatAction(_) => "sendChatAction",
            Self::MyCommands(_) => "setMyCommands",
        }
    }

    /// Returns the target chat, `None` for bot-wide methods.
    pub fn chat_id(&self) -> Option<&ChatId> {
        match self {
            Self::Message(m) => Some(&m.chat_id),
            Self::ChatAction(a) => Some(&a.chat_id),
            Self::MyCommands(_) => None,
        }
    }

    /// Returns the message parameters if this is a `sendMessage` call.
    pub fn as_message(&self) -> Option<&SendMessage> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }
}

impl From<SendMessage> for SendMethod {
    fn from(message: SendMessage) -> Self {
        Self::Message(message)
    }
}

impl From<SendChatAction> for SendMethod {
    fn from(action: SendChatAction) -> Self {
        Self::ChatAction(action)
    }
}

impl From<SetMyCommands> for SendMethod {
    fn from(commands: SetMyCommands) -> Self {
        Self::MyCommands(commands)
    }
}

/// Target chat: a numeric id or the `@username` of a public channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        Self::Username(username.to_string())
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

/// Parameters of `sendMessage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessage {
    pub chat_id: ChatId,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

impl SendMessage {
    /// Creates a plain text message for `chat_id`.
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            disable_notification: None,
            reply_to_message_id: None,
        }
    }

    /// Sets how the text is rendered.
    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    /// Sends the message as a reply to `message_id`.
    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    /// Sends the message silently.
    pub fn silent(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }
}

/// Text formatting understood by Telegram clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "Markdown",
            Self::MarkdownV2 => "MarkdownV2",
            Self::Html => "HTML",
        })
    }
}

/// Parameters of `sendChatAction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendChatAction {
    pub chat_id: ChatId,
    pub action: ChatAction,
}

impl SendChatAction {
    pub fn new(chat_id: impl Into<ChatId>, action: ChatAction) -> Self {
        Self {
            chat_id: chat_id.into(),
            action,
        }
    }
}

/// Parameters of `setMyCommands`: the command menu shown by clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetMyCommands {
    pub commands: Vec<BotCommand>,
}

/// An entry of the command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    /// Command name without the leading `/`, lower-case.
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Activity shown to the other party while the bot prepares a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_message_wire_format() {
        let method = SendMethod::from(SendMessage::new(100, "*hi*").parse_mode(ParseMode::Markdown));

        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            json!({
                "method": "sendMessage",
                "chat_id": 100,
                "text": "*hi*",
                "parse_mode": "Markdown"
            })
        );
    }

    #[test]
    fn test_chat_action_wire_format() {
        let method = SendMethod::from(SendChatAction::new("@news", ChatAction::UploadDocument));

        assert_eq!(method.method(), "sendChatAction");
        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            json!({ "method": "sendChatAction", "chat_id": "@news", "action": "upload_document" })
        );
    }

    #[test]
    fn test_set_my_commands_wire_format() {
        let method = SendMethod::from(SetMyCommands {
            commands: vec![BotCommand::new("about", "What this bot does")],
        });

        assert_eq!(method.method(), "setMyCommands");
        assert!(method.chat_id().is_none());
        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            json!({
                "method": "setMyCommands",
                "commands": [{ "command": "about", "description": "What this bot does" }]
            })
        );
    }

    #[test]
    fn test_decode_method_by_tag() {
        let method: SendMethod = serde_json::from_value(json!({
            "method": "sendMessage",
            "chat_id": -1001,
            "text": "<b>x</b>",
            "parse_mode": "HTML",
            "reply_to_message_id": 3
        }))
        .unwrap();

        let message = method.as_message().unwrap();
        assert_eq!(message.chat_id, ChatId::Id(-1001));
        assert_eq!(message.parse_mode, Some(ParseMode::Html));
        assert_eq!(message.reply_to_message_id, Some(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(ParseMode::Html.to_string(), "HTML");
        assert_eq!(ChatId::from(5).to_string(), "5");
        assert_eq!(ChatId::from("@news").to_string(), "@news");
    }
}
