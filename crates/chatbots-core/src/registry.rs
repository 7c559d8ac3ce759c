//! Handler registration.
//!
//! Handlers are collected once at startup by a [`HandlerRegistry`] and then
//! frozen into a [`Dispatcher`]. Building sorts the handlers by
//! [`order`](crate::Handler::order); handlers with equal order keep their
//! registration order.
//!
//! ```rust,ignore
//! let dispatcher = HandlerRegistry::new()
//!     .with(AboutCommandHandler::new(loader))
//!     .with(HelloWorldHandler)
//!     .with(UnknownCommandHandler)
//!     .with_resolver(telegram::resolver(&config))
//!     .build();
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::bot::BotConfigurationResolver;
use crate::dispatcher::Dispatcher;
use crate::handler::{BoxedHandler, Handler};

/// Collects handlers and builds an immutable [`Dispatcher`].
pub struct HandlerRegistry<B, I, O> {
    handlers: Vec<BoxedHandler<B, I, O>>,
    resolver: Option<BotConfigurationResolver<I, B>>,
}

impl<B, I, O> Default for HandlerRegistry<B, I, O> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            resolver: None,
        }
    }
}

impl<B, I, O> HandlerRegistry<B, I, O>
where
    B: 'static,
    I: 'static,
    O: 'static,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler.
    pub fn register<H>(&mut self, handler: H)
    where
        H: Handler<B, I, O>,
    {
        self.handlers.push(Arc::new(handler));
    }

    /// Registers a pre-built boxed handler.
    pub fn register_boxed(&mut self, handler: BoxedHandler<B, I, O>) {
        self.handlers.push(handler);
    }

    /// Registers a handler (builder pattern).
    pub fn with<H>(mut self, handler: H) -> Self
    where
        H: Handler<B, I, O>,
    {
        self.register(handler);
        self
    }

    /// Attaches a resolver used when a dispatch call supplies no bot
    /// configuration.
    pub fn with_resolver(mut self, resolver: BotConfigurationResolver<I, B>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Sorts the handlers by order and freezes them into a [`Dispatcher`].
    pub fn build(self) -> Dispatcher<B, I, O> {
        let mut handlers = self.handlers;
        // `sort_by_key` is stable: equal orders keep registration order.
        handlers.sort_by_key(|handler| handler.order());

        for (position, handler) in handlers.iter().enumerate() {
            debug!(
                position,
                handler = handler.name(),
                order = handler.order(),
                "Registered handler"
            );
        }

        Dispatcher::from_parts(handlers, self.resolver)
    }
}

impl<B, I, O> fmt::Debug for HandlerRegistry<B, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.handlers.len())
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{LOWEST_PRECEDENCE, handler_fn};

    fn named(name: &str, order: i32) -> crate::FnHandler<(), String, String> {
        handler_fn(name).with_order(order)
    }

    #[test]
    fn test_build_sorts_by_order() {
        let dispatcher = HandlerRegistry::new()
            .with(named("catch-all", LOWEST_PRECEDENCE))
            .with(named("default", 0))
            .with(named("command", -10))
            .build();

        assert_eq!(
            dispatcher.handler_names(),
            vec!["command", "default", "catch-all"]
        );
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let dispatcher = HandlerRegistry::new()
            .with(named("first", 0))
            .with(named("early", -1))
            .with(named("second", 0))
            .with(named("third", 0))
            .build();

        assert_eq!(
            dispatcher.handler_names(),
            vec!["early", "first", "second", "third"]
        );
    }

    #[test]
    fn test_debug_lists_handlers_in_order() {
        let registry = HandlerRegistry::new()
            .with(named("late", 1))
            .with(named("early", -1));
        assert_eq!(
            format!("{registry:?}"),
            "HandlerRegistry { handler_count: 2, has_resolver: false }"
        );

        let dispatcher = registry.build();
        assert_eq!(
            format!("{dispatcher:?}"),
            r#"Dispatcher { handlers: ["early", "late"], has_resolver: false }"#
        );
    }

    #[test]
    fn test_register_and_len() {
        let mut registry: HandlerRegistry<(), String, String> = HandlerRegistry::new();
        assert!(registry.is_empty());

        registry.register(named("a", 0));
        registry.register_boxed(Arc::new(named("b", 0)));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.build().handler_count(), 2);
    }
}
