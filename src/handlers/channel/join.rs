//! JOIN event handler.
//!
//! Links the joining user into the channel. When the joining nick is our
//! own, the channel is recorded as locally joined and the join hook fires.

use super::super::{Context, Handler, HandlerResult};
use slirc_proto::Line;
use tracing::info;

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // JOIN <channel> [account :realname]
        let (Some(nick), Some(channel)) = (line.source_nick(), line.param(0)) else {
            return Ok(());
        };

        ctx.session.link(nick, channel);

        if ctx.session.is_own_nick(nick) {
            ctx.session.mark_joined(channel);
            info!(channel = %channel, "Joined channel");
            ctx.hooks.on_join_channel(ctx.commands, channel);
        }

        ctx.refresh_whois(nick)
    }
}
