//! PART event handler.
//!
//! Unlinks the user from the channel in both directions. When we are the
//! one leaving, the whole channel entry is dropped.

use super::super::{Context, Handler, HandlerResult, user_line};
use crate::hooks::Target;
use slirc_proto::Line;
use tracing::info;

pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // PART <channel> [reason]
        let (Some(nick), Some(channel)) = (line.source_nick(), line.param(0)) else {
            return Ok(());
        };

        if ctx.session.is_own_nick(nick) {
            ctx.session.drop_channel(channel);
            info!(channel = %channel, "Left channel");
        } else {
            ctx.session.unlink(nick, channel);
        }

        let message = format!("{nick} has left {channel}");
        ctx.push(
            Target::Channel(channel.to_owned()),
            user_line(
                "PART",
                nick,
                "left",
                message.clone(),
                vec![channel.to_owned(), message],
            ),
        );
        Ok(())
    }
}
