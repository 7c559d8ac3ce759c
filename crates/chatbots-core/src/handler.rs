//! Command handlers.
//!
//! A [`Handler`] both decides whether it applies to an inbound message
//! ([`can_handle`](Handler::can_handle)) and produces the response when it
//! does ([`handle`](Handler::handle)). Every handler carries an
//! [`order`](Handler::order); the [`Dispatcher`](crate::Dispatcher) asks
//! handlers in ascending order and lets the first match answer.
//!
//! # Example
//!
//! ```rust,ignore
//! use chatbots_core::prelude::*;
//!
//! struct UnknownCommandHandler;
//!
//! #[async_trait::async_trait]
//! impl Handler<BasecampBotConfiguration, Query, String> for UnknownCommandHandler {
//!     fn can_handle(&self, _bot: Option<&BasecampBotConfiguration>, _input: &Query) -> bool {
//!         true
//!     }
//!
//!     async fn handle(
//!         &self,
//!         _bot: Option<&BasecampBotConfiguration>,
//!         input: &Query,
//!     ) -> HandlerResult<String> {
//!         Ok(Some(format!("I don't know how to handle your query: {}", input.command)))
//!     }
//!
//!     fn order(&self) -> i32 {
//!         LOWEST_PRECEDENCE
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;

/// Order of the handler evaluated first.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Order of the handler evaluated last. Reserved for catch-all handlers.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Order of handlers that do not declare one.
pub const DEFAULT_ORDER: i32 = 0;

/// Order of the built-in static command handlers.
pub const STATIC_COMMAND_ORDER: i32 = -10;

/// Result of [`Handler::handle`].
///
/// `Ok(None)` means the handler chose not to respond (for example because it
/// answers asynchronously through another channel).
pub type HandlerResult<O> = Result<Option<O>, BoxError>;

/// A unit that decides whether it applies to a message and answers it.
///
/// # Type Parameters
///
/// - `B`: the bot configuration type
/// - `I`: the inbound message type
/// - `O`: the outgoing response type
///
/// Handlers are shared across concurrent dispatch calls and must not keep
/// unsynchronized mutable state.
#[async_trait]
pub trait Handler<B, I, O>: Send + Sync + 'static {
    /// Returns `true` if this handler answers `input`.
    ///
    /// Must not have side effects. Partial or malformed messages should yield
    /// `false` rather than a panic.
    fn can_handle(&self, bot: Option<&B>, input: &I) -> bool;

    /// Produces the response for `input`.
    async fn handle(&self, bot: Option<&B>, input: &I) -> HandlerResult<O>;

    /// Priority of this handler; lower values are evaluated first.
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A type-erased handler stored in the registry.
pub type BoxedHandler<B, I, O> = Arc<dyn Handler<B, I, O>>;

type CheckFn<B, I> = Arc<dyn Fn(Option<&B>, &I) -> bool + Send + Sync>;
type RespondFn<B, I, O> = Arc<dyn Fn(Option<&B>, &I) -> HandlerResult<O> + Send + Sync>;

/// A handler assembled from closures.
///
/// Without a check the handler matches every message; without a responder it
/// answers with no response.
pub struct FnHandler<B, I, O> {
    name: String,
    order: i32,
    check: Option<CheckFn<B, I>>,
    respond: Option<RespondFn<B, I, O>>,
}

/// Starts building a closure-based handler named `name`.
///
/// ```rust,ignore
/// let hello = handler_fn::<TelegramBotConfiguration, Update, SendMethod>("hello")
///     .check(|_bot, update| update.text().is_some_and(|t| t.contains("hello")))
///     .respond(move |_bot, update| Ok(compose_send_message(&parser, update, "Hello World", None)));
/// ```
pub fn handler_fn<B, I, O>(name: impl Into<String>) -> FnHandler<B, I, O> {
    FnHandler {
        name: name.into(),
        order: DEFAULT_ORDER,
        check: None,
        respond: None,
    }
}

impl<B, I, O> FnHandler<B, I, O> {
    /// Sets the handler's order.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Sets the predicate deciding whether this handler applies.
    pub fn check<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&B>, &I) -> bool + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(f));
        self
    }

    /// Sets the function producing the response.
    pub fn respond<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&B>, &I) -> HandlerResult<O> + Send + Sync + 'static,
    {
        self.respond = Some(Arc::new(f));
        self
    }
}

impl<B, I, O> Clone for FnHandler<B, I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            order: self.order,
            check: self.check.clone(),
            respond: self.respond.clone(),
        }
    }
}

impl<B, I, O> fmt::Debug for FnHandler<B, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("name", &self.name)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<B, I, O> Handler<B, I, O> for FnHandler<B, I, O>
where
    B: Send + Sync + 'static,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    fn can_handle(&self, bot: Option<&B>, input: &I) -> bool {
        match &self.check {
            Some(f) => f(bot, input),
            None => true,
        }
    }

    async fn handle(&self, bot: Option<&B>, input: &I) -> HandlerResult<O> {
        match &self.respond {
            Some(f) => f(bot, input),
            None => Ok(None),
        }
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn name(&self) -> &str {
        &self.name
    }
}
