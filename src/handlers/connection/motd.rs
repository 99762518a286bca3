//! MOTD handlers (375, 372, 376, 422).
//!
//! 376 RPL_ENDOFMOTD, or 422 ERR_NOMOTD when the server has none, ends the
//! greeting. That is the readiness transition: tasks queued behind the
//! readiness gate are released once the current line finishes.

use super::super::{Context, Handler, HandlerResult, server_line};
use crate::hooks::Target;
use slirc_proto::Line;
use tracing::info;

/// 375/372: one MOTD text line to the console.
pub struct MotdHandler;

impl Handler for MotdHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        let text = line.param(1).unwrap_or("");
        ctx.push(
            Target::Console,
            server_line(&line.command, format!("[MOTD] {text}"), vec![text.to_owned()]),
        );
        Ok(())
    }
}

/// 376/422: greeting complete.
pub struct EndOfMotdHandler;

impl Handler for EndOfMotdHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        if ctx.session.mark_ready() {
            info!(numeric = %line.command, "Server greeting complete");
            ctx.hooks.on_ready(ctx.commands);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::Harness;

    #[test]
    fn test_motd_lines_go_to_console() {
        let mut h = Harness::new();
        h.run(&MotdHandler, ":srv 375 me :- srv Message of the day -");
        h.run(&MotdHandler, ":srv 372 me :- be nice");
        assert_eq!(
            h.sink.lines_for(&Target::Console),
            vec!["[MOTD] - srv Message of the day -", "[MOTD] - be nice"]
        );
    }

    #[test]
    fn test_ready_fires_once() {
        let mut h = Harness::new();
        assert!(!h.session.is_ready());
        h.run(&EndOfMotdHandler, ":srv 376 me :End of /MOTD command.");
        h.run(&EndOfMotdHandler, ":srv 422 me :MOTD File is missing");
        assert!(h.session.is_ready());
        assert_eq!(h.hooks.calls, vec!["ready"]);
    }
}
