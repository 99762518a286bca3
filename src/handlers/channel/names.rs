//! NAMES reply handlers (353 RPL_NAMREPLY, 366 RPL_ENDOFNAMES).
//!
//! The first 353 for a channel since the last 366 clears its membership,
//! so a NAMES listing is an idempotent resync. Later 353s append.

use super::super::{Context, Handler, HandlerResult, server_line};
use crate::hooks::Target;
use crate::state::parse_member_entry;
use slirc_proto::Line;
use tracing::debug;

pub struct NamesReplyHandler;

impl Handler for NamesReplyHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // 353 <me> [=*@] <channel> :<names>
        // Some servers omit the visibility symbol.
        let params = &line.params;
        if params.len() < 3 {
            return Ok(());
        }
        let channel = params[params.len() - 2].as_str();
        let entries: Vec<&str> = params[params.len() - 1].split_whitespace().collect();
        if channel.is_empty() || entries.is_empty() {
            return Ok(());
        }

        if ctx.session.begin_names(channel) {
            debug!(channel = %channel, "NAMES resync started");
        }

        for entry in &entries {
            let (modes, nick) = parse_member_entry(entry);
            if nick.is_empty() {
                continue;
            }
            ctx.session.link(nick, channel);
            if modes.op {
                ctx.session.set_op(channel, nick, true);
            }
            if modes.voice {
                ctx.session.set_voice(channel, nick, true);
            }
        }

        debug!(channel = %channel, count = entries.len(), "[353] Users in channel");
        Ok(())
    }
}

pub struct EndOfNamesHandler;

impl Handler for EndOfNamesHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // 366 <me> <channel> :End of /NAMES list
        let Some(channel) = line.param(1) else {
            return Ok(());
        };

        ctx.session.end_names(channel);

        ctx.push(
            Target::Channel(channel.to_owned()),
            server_line(
                "ENDOFNAMES",
                format!("End of user list for {channel}"),
                vec![channel.to_owned()],
            ),
        );
        debug!(channel = %channel, "[366] Finished processing NAMES");
        Ok(())
    }
}
