//! IRC event handlers.
//!
//! This module contains the Handler trait and the registry that dispatches
//! decoded lines to the handlers for their command token.
//!
//! Handlers are synchronous state transitions: they run under the engine's
//! exclusive section, one line at a time, and never fail on malformed input.

pub mod core;

mod channel;
mod connection;
mod helpers;
mod messaging;
mod user;

pub use self::core::{Context, FnHandler, Handler, HandlerResult, Registry, handler_fn};
pub use helpers::{SERVER_PREFIX, server_line, user_line};

pub use channel::{
    EndOfNamesHandler, JoinHandler, KickHandler, NamesReplyHandler, NoTopicHandler, PartHandler,
    TopicHandler, TopicReplyHandler, TopicWhoTimeHandler,
};
pub use connection::{EndOfMotdHandler, IsupportHandler, MotdHandler, PingHandler, WelcomeHandler};
pub use messaging::PrivmsgHandler;
pub use user::{ModeHandler, NickHandler, QuitHandler, UmodeHandler, WhoisHandler, mode_changes};
