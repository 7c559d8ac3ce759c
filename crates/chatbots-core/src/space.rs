//! Space extraction.
//!
//! A *space* is the chat, conversation, or channel a message belongs to. It
//! scopes configuration lookup and is the destination replies are addressed
//! to. Each platform adapter provides a [`SpaceParser`] for its message type,
//! which keeps the dispatcher and handlers platform-agnostic.

/// Retrieves the space associated with a message.
///
/// Implementations must return `None` rather than panic when the message
/// carries no space reference.
///
/// Any `Fn(&I) -> Option<S>` closure is a `SpaceParser`:
///
/// ```rust,ignore
/// let parser = |update: &Update| update.message.as_ref().map(|m| m.chat.clone());
/// assert!(parser.parse(&update).is_some());
/// ```
pub trait SpaceParser<I, S>: Send + Sync {
    /// Returns the space of `input`, if it has one.
    fn parse(&self, input: &I) -> Option<S>;
}

impl<I, S, F> SpaceParser<I, S> for F
where
    F: Fn(&I) -> Option<S> + Send + Sync,
{
    fn parse(&self, input: &I) -> Option<S> {
        self(input)
    }
}
