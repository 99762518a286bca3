//! QUIT event handler.

use super::super::{Context, Handler, HandlerResult, user_line};
use crate::hooks::Target;
use slirc_proto::Line;

/// Removes the quitting user from every channel and from the directory.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // :nick!u@h QUIT [:reason]
        let Some(nick) = line.source_nick() else {
            return Ok(());
        };

        let mut message = format!("{nick} has quit");
        if !line.params.is_empty() {
            let reason: Vec<&str> = line
                .params
                .iter()
                .map(|p| p.trim_matches('"'))
                .collect();
            message.push_str(" : ");
            message.push_str(&reason.join(" "));
        }

        ctx.refresh.forget(nick);
        for channel in ctx.session.remove_user(nick) {
            ctx.push(
                Target::Channel(channel.clone()),
                user_line("QUIT", nick, "quit", message.clone(), vec![channel, message.clone()]),
            );
        }
        Ok(())
    }
}
