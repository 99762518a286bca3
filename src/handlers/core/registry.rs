//! Event handler registry and dispatch.
//!
//! The `Registry` maps a command or numeric token to an ordered list of
//! handlers. Dispatch runs every handler for the token in registration
//! order; a failing handler is logged and the rest still run.

use super::context::{Context, Handler};
use crate::handlers::{
    channel::{
        EndOfNamesHandler, JoinHandler, KickHandler, NamesReplyHandler, NoTopicHandler,
        PartHandler, TopicHandler, TopicReplyHandler, TopicWhoTimeHandler,
    },
    connection::{EndOfMotdHandler, IsupportHandler, MotdHandler, PingHandler, WelcomeHandler},
    messaging::PrivmsgHandler,
    user::{ModeHandler, NickHandler, QuitHandler, UmodeHandler, WhoisHandler},
};
use crate::telemetry::DispatchTimer;
use slirc_proto::{Line, Response};
use std::collections::HashMap;
use tracing::{Level, span, warn};

/// Registry of event handlers.
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<String, Vec<Box<dyn Handler>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in handler registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Connection handlers
        registry.add("PING", PingHandler);
        registry.add_numeric(Response::RPL_WELCOME, WelcomeHandler);
        registry.add_numeric(Response::RPL_ISUPPORT, IsupportHandler);
        registry.add_numeric(Response::RPL_MOTDSTART, MotdHandler);
        registry.add_numeric(Response::RPL_MOTD, MotdHandler);
        registry.add_numeric(Response::RPL_ENDOFMOTD, EndOfMotdHandler);
        registry.add_numeric(Response::ERR_NOMOTD, EndOfMotdHandler);

        // Channel handlers
        registry.add("JOIN", JoinHandler);
        registry.add("PART", PartHandler);
        registry.add("KICK", KickHandler);
        registry.add("TOPIC", TopicHandler);
        registry.add_numeric(Response::RPL_NOTOPIC, NoTopicHandler);
        registry.add_numeric(Response::RPL_TOPIC, TopicReplyHandler);
        registry.add_numeric(Response::RPL_TOPICWHOTIME, TopicWhoTimeHandler);
        registry.add_numeric(Response::RPL_NAMREPLY, NamesReplyHandler);
        registry.add_numeric(Response::RPL_ENDOFNAMES, EndOfNamesHandler);

        // User handlers
        registry.add("NICK", NickHandler);
        registry.add("QUIT", QuitHandler);
        registry.add("MODE", ModeHandler);
        registry.add_numeric(Response::RPL_UMODEIS, UmodeHandler);
        for numeric in [
            Response::RPL_WHOISUSER,
            Response::RPL_WHOISSERVER,
            Response::RPL_WHOISOPERATOR,
            Response::RPL_WHOISIDLE,
            Response::RPL_WHOISCHANNELS,
            Response::RPL_WHOISACCOUNT,
            Response::RPL_AWAY,
            Response::RPL_ENDOFWHOIS,
        ] {
            registry.add_numeric(numeric, WhoisHandler);
        }

        // Messaging handlers
        registry.add("PRIVMSG", PrivmsgHandler);
        registry.add("NOTICE", PrivmsgHandler);

        registry
    }

    /// Append a handler for a command token.
    pub fn add(&mut self, command: &str, handler: impl Handler + 'static) {
        self.handlers
            .entry(command.to_ascii_uppercase())
            .or_default()
            .push(Box::new(handler));
    }

    /// Append a handler for a numeric reply.
    pub fn add_numeric(&mut self, response: Response, handler: impl Handler + 'static) {
        self.add(&response.as_command(), handler);
    }

    /// Number of handlers registered for a token.
    pub fn handler_count(&self, command: &str) -> usize {
        self.handlers
            .get(command.to_ascii_uppercase().as_str())
            .map_or(0, Vec::len)
    }

    /// Registered tokens, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut commands: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        commands.sort_unstable();
        commands
    }

    /// Run every handler registered for the line's command.
    ///
    /// Returns how many handlers ran. Dispatch is not cancellable: an error
    /// from one handler is logged and the next handler still runs.
    pub fn dispatch(&self, ctx: &mut Context<'_>, line: &Line) -> usize {
        let cmd_name = line.command.to_ascii_uppercase();
        let Some(handlers) = self.handlers.get(cmd_name.as_str()) else {
            return 0;
        };

        let irc_span = span!(
            Level::DEBUG,
            "irc.line",
            command = %cmd_name,
            source_nick = line.source_nick(),
            target = line.param(0),
            msgid = line.tags.get("msgid").map(String::as_str),
        );
        let _enter = irc_span.enter();
        let _timer = DispatchTimer::new(&cmd_name);

        for (index, handler) in handlers.iter().enumerate() {
            if let Err(e) = handler.handle(ctx, line) {
                warn!(
                    command = %cmd_name,
                    handler = index,
                    error = %e,
                    code = e.error_code(),
                    "Handler failed"
                );
            }
        }

        handlers.len()
    }
}
