//! KICK event handler.

use super::super::{Context, Handler, HandlerResult, user_line};
use crate::hooks::Target;
use slirc_proto::Line;
use tracing::info;

pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // KICK <channel> <nick> [reason]
        let (Some(channel), Some(kicked)) = (line.param(0), line.param(1)) else {
            return Ok(());
        };
        let reason = line.param(2).unwrap_or("");

        if ctx.session.is_own_nick(kicked) {
            ctx.session.drop_channel(channel);
            info!(
                channel = %channel,
                by = line.source_nick().unwrap_or("*"),
                reason = %reason,
                "Kicked from channel"
            );
        } else {
            ctx.session.unlink(kicked, channel);
        }

        ctx.push(
            Target::Channel(channel.to_owned()),
            user_line(
                "KICK",
                kicked,
                "kicked",
                format!("{kicked} was kicked from {channel} ({reason})"),
                vec![channel.to_owned(), kicked.to_owned(), reason.to_owned()],
            ),
        );
        Ok(())
    }
}
