//! Message dispatcher.
//!
//! The [`Dispatcher`] routes one inbound message to exactly one handler:
//!
//! 1. If the caller supplies no bot configuration and a resolver is attached,
//!    the configuration is resolved from the message
//! 2. Handlers are asked in ascending order whether they can handle the message
//! 3. The first handler that can is invoked and its result returned as-is,
//!    even when it produced no response
//! 4. If no handler matches, the result is `Ok(None)`
//!
//! The dispatcher never produces a response of its own. Applications that
//! want every message answered register a catch-all handler at
//! [`LOWEST_PRECEDENCE`](crate::LOWEST_PRECEDENCE).
//!
//! # Tower Service Integration
//!
//! `Dispatcher` implements `tower::Service<DispatchRequest<B, I>>`, so callers
//! can apply middleware such as timeouts:
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use tower::{ServiceBuilder, ServiceExt};
//!
//! let service = ServiceBuilder::new()
//!     .timeout(Duration::from_secs(5))
//!     .service(dispatcher);
//!
//! let reply = service.oneshot(DispatchRequest::new(update)).await?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;
use tower::Service;
use tracing::{Instrument, debug, debug_span, trace};

use crate::bot::BotConfigurationResolver;
use crate::error::BoxError;
use crate::handler::BoxedHandler;

struct DispatcherInner<B, I, O> {
    /// Sorted by order, ties in registration order.
    handlers: Vec<BoxedHandler<B, I, O>>,
    resolver: Option<BotConfigurationResolver<I, B>>,
}

/// Routes inbound messages to the first matching handler.
///
/// Built by [`HandlerRegistry::build`](crate::HandlerRegistry::build). The
/// handler chain is immutable; cloning is cheap and clones share it.
///
/// # Thread Safety
///
/// `Dispatcher` is `Send + Sync` and keeps no state between calls, so it can
/// serve concurrent dispatches without locking.
pub struct Dispatcher<B, I, O> {
    inner: Arc<DispatcherInner<B, I, O>>,
}

impl<B, I, O> Dispatcher<B, I, O>
where
    B: 'static,
    I: 'static,
    O: 'static,
{
    pub(crate) fn from_parts(
        handlers: Vec<BoxedHandler<B, I, O>>,
        resolver: Option<BotConfigurationResolver<I, B>>,
    ) -> Self {
        Self {
            inner: Arc::new(DispatcherInner { handlers, resolver }),
        }
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.inner.handlers.len()
    }

    /// Returns the handler names in evaluation order.
    pub fn handler_names(&self) -> Vec<&str> {
        self.inner.handlers.iter().map(|h| h.name()).collect()
    }

    /// Returns `true` if a configuration resolver is attached.
    pub fn has_resolver(&self) -> bool {
        self.inner.resolver.is_some()
    }
}

impl<B, I, O> Dispatcher<B, I, O>
where
    B: Send + Sync + 'static,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    /// Dispatches `input` to the first handler that can handle it.
    ///
    /// `bot` is the configuration of the bot the message was sent to. When it
    /// is `None` and a resolver is attached, the configuration is resolved
    /// from the message; otherwise handlers see `None`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(response))` if the matching handler responded
    /// - `Ok(None)` if no handler matched, or the matching handler chose not
    ///   to respond
    /// - `Err(e)` with the matching handler's error, unmodified
    pub async fn dispatch(&self, bot: Option<&B>, input: &I) -> Result<Option<O>, BoxError> {
        let span = debug_span!("dispatch", handlers = self.inner.handlers.len());

        let resolved: Option<B>;
        let bot = match (bot, &self.inner.resolver) {
            (Some(bot), _) => Some(bot),
            (None, Some(resolver)) => {
                resolved = resolver.resolve(input);
                trace!(
                    parent: &span,
                    resolved = resolved.is_some(),
                    "Resolved bot configuration"
                );
                resolved.as_ref()
            }
            (None, None) => None,
        };

        self.dispatch_to_first_match(bot, input)
            .instrument(span)
            .await
    }

    async fn dispatch_to_first_match(
        &self,
        bot: Option<&B>,
        input: &I,
    ) -> Result<Option<O>, BoxError> {
        for handler in &self.inner.handlers {
            if !handler.can_handle(bot, input) {
                trace!(handler = handler.name(), "Handler cannot handle message");
                continue;
            }

            debug!(
                handler = handler.name(),
                order = handler.order(),
                "Handler matched, dispatching"
            );
            return handler.handle(bot, input).await;
        }

        debug!("No handler matched");
        Ok(None)
    }
}

impl<B, I, O> Clone for Dispatcher<B, I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, I, O> fmt::Debug for Dispatcher<B, I, O>
where
    B: 'static,
    I: 'static,
    O: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handler_names())
            .field("has_resolver", &self.has_resolver())
            .finish()
    }
}

// ============================================================================
// Tower Service Implementation for Dispatcher
// ============================================================================

/// An owned dispatch request, used by the `tower::Service` implementation.
#[derive(Debug, Clone)]
pub struct DispatchRequest<B, I> {
    /// Bot configuration, if already known to the caller.
    pub bot: Option<B>,
    /// The decoded inbound message.
    pub input: I,
}

impl<B, I> DispatchRequest<B, I> {
    /// Creates a request without a bot configuration.
    pub fn new(input: I) -> Self {
        Self { bot: None, input }
    }

    /// Creates a request for a known bot.
    pub fn with_bot(bot: B, input: I) -> Self {
        Self {
            bot: Some(bot),
            input,
        }
    }
}

impl<B, I, O> Service<DispatchRequest<B, I>> for Dispatcher<B, I, O>
where
    B: Send + Sync + 'static,
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    type Response = Option<O>;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: DispatchRequest<B, I>) -> Self::Future {
        let dispatcher = self.clone();
        async move {
            dispatcher
                .dispatch(request.bot.as_ref(), &request.input)
                .await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::BotConfiguration;
    use crate::handler::{FnHandler, Handler, HandlerResult, LOWEST_PRECEDENCE, handler_fn};
    use crate::registry::HandlerRegistry;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use thiserror::Error;
    use tower::ServiceExt;

    #[derive(Debug, Clone, PartialEq)]
    struct TestBot {
        name: String,
    }

    impl BotConfiguration for TestBot {
        fn name(&self) -> &str {
            &self.name
        }
    }

    type TestHandler = FnHandler<TestBot, String, String>;

    fn replying(name: &str, order: i32, needle: &'static str, reply: &'static str) -> TestHandler {
        handler_fn(name)
            .with_order(order)
            .check(move |_bot, text: &String| text.contains(needle))
            .respond(move |_bot, _text| Ok(Some(reply.to_string())))
    }

    fn unknown() -> TestHandler {
        handler_fn("unknown")
            .with_order(LOWEST_PRECEDENCE)
            .respond(|_bot, text: &String| {
                Ok(Some(format!("I don't know how to handle your query: {text}")))
            })
    }

    fn counting(
        name: &str,
        order: i32,
        matches: bool,
        checks: Arc<AtomicUsize>,
        handles: Arc<AtomicUsize>,
    ) -> TestHandler {
        handler_fn(name)
            .with_order(order)
            .check(move |_bot, _text| {
                checks.fetch_add(1, Ordering::SeqCst);
                matches
            })
            .respond(move |_bot, _text| {
                handles.fetch_add(1, Ordering::SeqCst);
                Ok(Some("counted".to_string()))
            })
    }

    #[tokio::test]
    async fn test_dispatch_no_handlers() {
        let dispatcher: Dispatcher<TestBot, String, String> = HandlerRegistry::new().build();
        let result = dispatcher.dispatch(None, &"hello".to_string()).await;
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hello_world_matches_substring() {
        let dispatcher = HandlerRegistry::new()
            .with(replying("hello", 0, "hello", "Hello World"))
            .with(unknown())
            .build();

        let reply = dispatcher
            .dispatch(None, &"hello there".to_string())
            .await
            .unwrap();
        assert_eq!(reply.as_deref(), Some("Hello World"));
    }

    #[tokio::test]
    async fn test_unmatched_text_falls_to_catch_all() {
        let dispatcher = HandlerRegistry::new()
            .with(unknown())
            .with(replying("hello", 0, "hello", "Hello World"))
            .build();

        let reply = dispatcher
            .dispatch(None, &"some text".to_string())
            .await
            .unwrap();
        assert_eq!(
            reply.as_deref(),
            Some("I don't know how to handle your query: some text")
        );
    }

    #[tokio::test]
    async fn test_lowest_order_match_wins() {
        let dispatcher = HandlerRegistry::new()
            .with(replying("late", 10, "x", "late"))
            .with(replying("early", -10, "x", "early"))
            .with(replying("middle", 0, "x", "middle"))
            .build();

        let reply = dispatcher.dispatch(None, &"x".to_string()).await.unwrap();
        assert_eq!(reply.as_deref(), Some("early"));
    }

    #[tokio::test]
    async fn test_only_first_match_is_handled() {
        let checks = Arc::new(AtomicUsize::new(0));
        let handled_first = Arc::new(AtomicUsize::new(0));
        let handled_second = Arc::new(AtomicUsize::new(0));
        let handled_skipped = Arc::new(AtomicUsize::new(0));

        let dispatcher = HandlerRegistry::new()
            .with(counting(
                "second",
                5,
                true,
                Arc::clone(&checks),
                Arc::clone(&handled_second),
            ))
            .with(counting(
                "skipped",
                -5,
                false,
                Arc::clone(&checks),
                Arc::clone(&handled_skipped),
            ))
            .with(counting(
                "first",
                0,
                true,
                Arc::clone(&checks),
                Arc::clone(&handled_first),
            ))
            .build();

        dispatcher.dispatch(None, &"m".to_string()).await.unwrap();

        // "skipped" and "first" were asked, "second" never was.
        assert_eq!(checks.load(Ordering::SeqCst), 2);
        assert_eq!(handled_skipped.load(Ordering::SeqCst), 0);
        assert_eq!(handled_first.load(Ordering::SeqCst), 1);
        assert_eq!(handled_second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_match_invokes_no_handle() {
        let checks = Arc::new(AtomicUsize::new(0));
        let handles = Arc::new(AtomicUsize::new(0));

        let dispatcher = HandlerRegistry::new()
            .with(counting("a", 0, false, Arc::clone(&checks), Arc::clone(&handles)))
            .with(counting("b", 1, false, Arc::clone(&checks), Arc::clone(&handles)))
            .build();

        let reply = dispatcher.dispatch(None, &"m".to_string()).await.unwrap();

        assert!(reply.is_none());
        assert_eq!(checks.load(Ordering::SeqCst), 2);
        assert_eq!(handles.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_match_without_response_stops_chain() {
        let silent = handler_fn("silent")
            .check(|_bot, text: &String| text.starts_with('/'))
            .respond(|_bot, _text| Ok(None));

        let dispatcher = HandlerRegistry::new()
            .with(silent)
            .with(unknown())
            .build();

        let reply = dispatcher.dispatch(None, &"/about".to_string()).await.unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_catch_all_always_responds() {
        let dispatcher = HandlerRegistry::new()
            .with(replying("hello", 0, "hello", "Hello World"))
            .with(unknown())
            .build();

        for text in ["", "/about", "anything", "hello"] {
            let reply = dispatcher.dispatch(None, &text.to_string()).await.unwrap();
            assert!(reply.is_some(), "no response for {text:?}");
        }
    }

    #[derive(Debug, Error)]
    #[error("backend unavailable")]
    struct BackendUnavailable;

    struct Failing;

    #[async_trait]
    impl Handler<TestBot, String, String> for Failing {
        fn can_handle(&self, _bot: Option<&TestBot>, _input: &String) -> bool {
            true
        }

        async fn handle(&self, _bot: Option<&TestBot>, _input: &String) -> HandlerResult<String> {
            Err(BackendUnavailable.into())
        }
    }

    #[tokio::test]
    async fn test_handler_error_propagates_unmodified() {
        let dispatcher = HandlerRegistry::new()
            .with(Failing)
            .with(unknown())
            .build();

        let err = dispatcher
            .dispatch(None, &"x".to_string())
            .await
            .unwrap_err();
        assert!(err.is::<BackendUnavailable>());
        assert_eq!(err.to_string(), "backend unavailable");
    }

    #[tokio::test]
    async fn test_order_stable_across_dispatches() {
        let dispatcher = HandlerRegistry::new()
            .with(replying("a", 0, "x", "a"))
            .with(replying("b", 0, "x", "b"))
            .with(replying("c", 0, "x", "c"))
            .build();

        let names = dispatcher.handler_names().join(",");
        for _ in 0..10 {
            let reply = dispatcher.dispatch(None, &"x".to_string()).await.unwrap();
            assert_eq!(reply.as_deref(), Some("a"));
            assert_eq!(dispatcher.handler_names().join(","), names);
        }
    }

    fn bot_named_handler() -> TestHandler {
        handler_fn("bot-name").respond(|bot: Option<&TestBot>, _text| {
            Ok(Some(
                bot.map(|b| b.name.clone())
                    .unwrap_or_else(|| "unconfigured".to_string()),
            ))
        })
    }

    #[tokio::test]
    async fn test_missing_configuration_is_tolerated() {
        let dispatcher = HandlerRegistry::new().with(bot_named_handler()).build();

        let reply = dispatcher.dispatch(None, &"x".to_string()).await.unwrap();
        assert_eq!(reply.as_deref(), Some("unconfigured"));
    }

    #[tokio::test]
    async fn test_resolver_used_when_no_bot_supplied() {
        let resolver = BotConfigurationResolver::from_fn(|text: &String| {
            text.starts_with("room-1").then(|| TestBot {
                name: "resolved".to_string(),
            })
        });
        let dispatcher = HandlerRegistry::new()
            .with(bot_named_handler())
            .with_resolver(resolver)
            .build();
        assert!(dispatcher.has_resolver());

        let resolved = dispatcher.dispatch(None, &"room-1 hi".to_string()).await;
        assert_eq!(resolved.unwrap().as_deref(), Some("resolved"));

        let unresolved = dispatcher.dispatch(None, &"room-2 hi".to_string()).await;
        assert_eq!(unresolved.unwrap().as_deref(), Some("unconfigured"));

        let explicit = TestBot {
            name: "explicit".to_string(),
        };
        let supplied = dispatcher
            .dispatch(Some(&explicit), &"room-1 hi".to_string())
            .await;
        assert_eq!(supplied.unwrap().as_deref(), Some("explicit"));
    }

    #[tokio::test]
    async fn test_concurrent_dispatch() {
        let dispatcher = HandlerRegistry::new()
            .with(replying("hello", 0, "hello", "Hello World"))
            .with(unknown())
            .build();

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    let text = if i % 2 == 0 { "hello" } else { "other" };
                    dispatcher.dispatch(None, &text.to_string()).await.unwrap()
                })
            })
            .collect();

        for (i, task) in tasks.into_iter().enumerate() {
            let reply = task.await.unwrap().unwrap();
            if i % 2 == 0 {
                assert_eq!(reply, "Hello World");
            } else {
                assert!(reply.starts_with("I don't know"));
            }
        }
    }

    #[tokio::test]
    async fn test_dispatcher_as_tower_service() {
        let dispatcher = HandlerRegistry::new()
            .with(replying("hello", 0, "hello", "Hello World"))
            .build();

        let reply = dispatcher
            .clone()
            .oneshot(DispatchRequest::new("hello".to_string()))
            .await
            .unwrap();
        assert_eq!(reply.as_deref(), Some("Hello World"));

        let bot = TestBot {
            name: "svc".to_string(),
        };
        let none = dispatcher
            .oneshot(DispatchRequest::with_bot(bot, "nope".to_string()))
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_dispatcher_with_timeout_layer() {
        let dispatcher = HandlerRegistry::new().with(unknown()).build();
        let service = tower::ServiceBuilder::new()
            .timeout(Duration::from_secs(5))
            .service(dispatcher);

        let reply = service
            .oneshot(DispatchRequest::new("abc".to_string()))
            .await
            .unwrap();
        assert_eq!(
            reply.as_deref(),
            Some("I don't know how to handle your query: abc")
        );
    }

    #[test]
    fn test_service_is_always_ready() {
        let mut dispatcher: Dispatcher<TestBot, String, String> = HandlerRegistry::new().build();
        let mut ready = tokio_test::task::spawn(ServiceExt::<
            DispatchRequest<TestBot, String>,
        >::ready(&mut dispatcher));
        tokio_test::assert_ready_ok!(ready.poll());
    }
}
