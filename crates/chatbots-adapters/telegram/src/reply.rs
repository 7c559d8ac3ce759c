//! Composing replies to updates.

use chatbots_core::{FileExtension, SpaceParser};

use crate::model::{Chat, ParseMode, SendMessage, Update};

/// Builds a `sendMessage` call answering `update` in its own chat.
///
/// Returns `None` when the update has no chat to answer in.
pub fn compose_send_message<P>(
    space_parser: &P,
    update: &Update,
    text: impl Into<String>,
    parse_mode: Option<ParseMode>,
) -> Option<SendMessage>
where
    P: SpaceParser<Update, Chat> + ?Sized,
{
    let chat = space_parser.parse(update)?;
    let mut message = SendMessage::new(chat.id, text);
    message.parse_mode = parse_mode;
    Some(message)
}

/// Maps the kind of a command text file to the parse mode rendering it.
///
/// HTML files render as HTML, everything else as Markdown.
pub fn parse_mode_of(extension: FileExtension) -> ParseMode {
    match extension {
        FileExtension::Html => ParseMode::Html,
        _ => ParseMode::Markdown,
    }
}
