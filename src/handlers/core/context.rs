//! Handler context and core types.
//!
//! Defines the `Context<'a>` struct passed to all handlers. It borrows the
//! engine's parts for the duration of one line, so a handler can mutate the
//! session, emit derived lines, call hooks, and issue follow-up commands.

use crate::client::{Commands, WhoisRefresh};
use crate::hooks::{Hooks, LineSink, Target};
use crate::state::Session;
use slirc_proto::Line;

pub use crate::error::{ClientError, HandlerResult};

/// Handler context passed to each event handler.
pub struct Context<'a> {
    /// Session state owned by the engine.
    pub session: &'a mut Session,
    /// Encoder for follow-up commands.
    pub commands: &'a Commands,
    /// Application callbacks.
    pub hooks: &'a mut dyn Hooks,
    /// Presentation sink for derived lines.
    pub sink: &'a mut dyn LineSink,
    /// WHOIS refresh policy.
    pub refresh: &'a mut WhoisRefresh,
}

impl Context<'_> {
    /// Push a derived display line.
    #[inline]
    pub fn push(&mut self, target: Target, line: Line) {
        self.sink.push(target, line);
    }

    /// Issue a WHOIS for `nick` if the refresh policy allows it.
    pub fn refresh_whois(&mut self, nick: &str) -> HandlerResult {
        if self.refresh.should_query(nick) {
            self.commands.whois(nick)?;
        }
        Ok(())
    }
}

/// An event handler.
///
/// Handlers never fail on malformed lines; missing fields make them a
/// no-op. Errors are reserved for failed follow-up sends.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult;
}

/// Adapter turning a closure into a [`Handler`].
pub struct FnHandler<F>(F);

/// Wrap a closure as a handler.
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&mut Context<'_>, &Line) -> HandlerResult + Send + Sync,
{
    FnHandler(f)
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&mut Context<'_>, &Line) -> HandlerResult + Send + Sync,
{
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        (self.0)(ctx, line)
    }
}
