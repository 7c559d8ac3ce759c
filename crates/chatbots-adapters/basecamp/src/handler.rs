//! Built-in Basecamp handlers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chatbots_core::{
    Handler, HandlerResult, STATIC_COMMAND_ORDER, SlashCommandParser, TextResourceLoader,
    command_matches, normalize_command,
};
use tracing::debug;

use crate::config::BasecampBotConfiguration;
use crate::model::Query;
use crate::parser::BasecampSlashCommandParser;

/// Answers a slash command with static text from a [`TextResourceLoader`].
///
/// Only claims a query when text exists for the command. The text is
/// returned as is; Basecamp renders HTML responses.
pub struct StaticCommandHandler {
    command: String,
    loader: Arc<dyn TextResourceLoader>,
    order: i32,
}

impl StaticCommandHandler {
    /// Creates a handler for `command` (`/about` or `about`).
    pub fn new(command: &str, loader: Arc<dyn TextResourceLoader>) -> Self {
        Self {
            command: normalize_command(command),
            loader,
            order: STATIC_COMMAND_ORDER,
        }
    }

    /// Overrides the default order.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Returns the normalized command this handler answers.
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl fmt::Debug for StaticCommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCommandHandler")
            .field("command", &self.command)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler<BasecampBotConfiguration, Query, String> for StaticCommandHandler {
    fn can_handle(&self, bot: Option<&BasecampBotConfiguration>, query: &Query) -> bool {
        BasecampSlashCommandParser
            .parse(bot, query)
            .is_some_and(|command| command_matches(&command, &self.command))
            && self.loader.compose_command_response(&self.command).is_some()
    }

    async fn handle(
        &self,
        _bot: Option<&BasecampBotConfiguration>,
        _query: &Query,
    ) -> HandlerResult<String> {
        let Some(response) = self.loader.compose_command_response(&self.command) else {
            debug!(command = %self.command, "Command text disappeared");
            return Ok(None);
        };
        Ok(Some(response.text))
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn name(&self) -> &str {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbots_core::{
        BoxError, DefaultTextResourceLoader, FileExtension, LOWEST_PRECEDENCE, StaticTextResources,
        TextResourceSettings, handler_fn,
    };

    use crate::{BasecampDispatcher, BasecampHandlerRegistry};

    struct HelloWorldHandler;

    #[async_trait]
    impl Handler<BasecampBotConfiguration, Query, String> for HelloWorldHandler {
        fn can_handle(&self, _bot: Option<&BasecampBotConfiguration>, query: &Query) -> bool {
            query.command.contains("hello")
        }

        async fn handle(
            &self,
            _bot: Option<&BasecampBotConfiguration>,
            _query: &Query,
        ) -> HandlerResult<String> {
            Ok(Some("Hello World".to_string()))
        }
    }

    struct UnknownCommandHandler;

    #[async_trait]
    impl Handler<BasecampBotConfiguration, Query, String> for UnknownCommandHandler {
        fn can_handle(&self, _bot: Option<&BasecampBotConfiguration>, _query: &Query) -> bool {
            true
        }

        async fn handle(
            &self,
            _bot: Option<&BasecampBotConfiguration>,
            query: &Query,
        ) -> HandlerResult<String> {
            Ok(Some(format!(
                "I don't know how to handle your query: {}",
                query.command
            )))
        }

        fn order(&self) -> i32 {
            LOWEST_PRECEDENCE
        }
    }

    fn dispatcher(loader: Arc<dyn TextResourceLoader>) -> BasecampDispatcher {
        BasecampHandlerRegistry::new()
            .with(HelloWorldHandler)
            .with(UnknownCommandHandler)
            .with(StaticCommandHandler::new("/about", loader))
            .build()
    }

    async fn reply(dispatcher: &BasecampDispatcher, command: &str) -> Option<String> {
        dispatcher.dispatch(None, &Query::new(command)).await.unwrap()
    }

    #[tokio::test]
    async fn test_about_without_text_reaches_catch_all() {
        let dispatcher = dispatcher(Arc::new(StaticTextResources::new()));

        assert_eq!(
            reply(&dispatcher, "/about").await.as_deref(),
            Some("I don't know how to handle your query: /about")
        );
    }

    #[tokio::test]
    async fn test_about_from_text_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("botcommands")).unwrap();
        std::fs::write(
            dir.path().join("botcommands/about.md"),
            "Bot developed with love using [Rust](https://www.rust-lang.org)\n",
        )
        .unwrap();
        let loader = DefaultTextResourceLoader::with_root(dir.path(), TextResourceSettings::default());
        let dispatcher = dispatcher(Arc::new(loader));

        let text = reply(&dispatcher, "/About").await.unwrap();
        assert_eq!(
            text.trim(),
            "Bot developed with love using [Rust](https://www.rust-lang.org)"
        );
    }

    #[tokio::test]
    async fn test_hello_world() {
        let dispatcher = dispatcher(Arc::new(StaticTextResources::new()));
        assert_eq!(
            reply(&dispatcher, "hello there").await.as_deref(),
            Some("Hello World")
        );
    }

    #[tokio::test]
    async fn test_unknown_text() {
        let dispatcher = dispatcher(Arc::new(StaticTextResources::new()));
        assert_eq!(
            reply(&dispatcher, "some text").await.as_deref(),
            Some("I don't know how to handle your query: some text")
        );
    }

    #[tokio::test]
    async fn test_static_command_outranks_default_handlers() {
        let loader = StaticTextResources::new().with("hello", FileExtension::Text, "static hello");
        let dispatcher = BasecampHandlerRegistry::new()
            .with(HelloWorldHandler)
            .with(StaticCommandHandler::new("hello", Arc::new(loader)))
            .build();

        assert_eq!(
            reply(&dispatcher, "/hello").await.as_deref(),
            Some("static hello")
        );
    }

    #[tokio::test]
    async fn test_handler_failure_propagates() {
        let dispatcher = BasecampHandlerRegistry::new()
            .with(
                handler_fn::<BasecampBotConfiguration, Query, String>("broken")
                    .respond(|_bot, _query| Err(BoxError::from("campfire unavailable"))),
            )
            .with(UnknownCommandHandler)
            .build();

        let err = dispatcher
            .dispatch(None, &Query::new("anything"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "campfire unavailable");
    }

    #[tokio::test]
    async fn test_resolved_bot_reaches_handlers() {
        let config = crate::BasecampConfig {
            bots: vec![BasecampBotConfiguration::new("helpdesk")],
        };
        let dispatcher = BasecampHandlerRegistry::new()
            .with(
                handler_fn::<BasecampBotConfiguration, Query, String>("whoami")
                    .respond(|bot, _query| Ok(bot.map(|b| b.name.clone()))),
            )
            .with_resolver(config.resolver())
            .build();

        let query = Query::new("who").with_callback_url("https://3.basecamp.com/1/lines");
        assert_eq!(
            dispatcher.dispatch(None, &query).await.unwrap().as_deref(),
            Some("helpdesk")
        );
        assert_eq!(dispatcher.dispatch(None, &Query::new("who")).await.unwrap(), None);
    }
}
