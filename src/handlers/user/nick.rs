//! NICK event handler.
//!
//! Re-keys the user in the directory and rewrites every channel membership
//! in the same step, so no channel ever lists both nicks.

use super::super::{Context, Handler, HandlerResult, user_line};
use crate::hooks::Target;
use slirc_proto::Line;
use tracing::info;

pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // :old!u@h NICK <new>
        let (Some(old), Some(new)) = (line.source_nick(), line.param(0)) else {
            return Ok(());
        };
        if new.is_empty() {
            return Ok(());
        }

        let was_us = ctx.session.is_own_nick(old);
        let channels = ctx.session.rename_user(old, new);
        if was_us {
            info!(old = %old, new = %new, "Own nick changed");
        }

        let message = format!("{old} is now known as {new}");
        for channel in channels {
            ctx.push(
                Target::Channel(channel),
                user_line("NICK", old, "nick", message.clone(), vec![new.to_owned()]),
            );
        }

        ctx.hooks.on_nick(ctx.commands, old, new);
        // The new nick gets its own fresh query.
        ctx.refresh.forget(old);
        ctx.refresh_whois(new)
    }
}
