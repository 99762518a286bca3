//! PING handler.

use super::super::{Context, Handler, HandlerResult};
use slirc_proto::Line;

/// Answers PING with a PONG carrying the same parameters.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        ctx.commands.pong(line.params.clone())
    }
}
