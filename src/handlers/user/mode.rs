//! MODE handlers.
//!
//! Channel MODE lines are walked in full (`+ov-v a b c`) and every op or
//! voice change is applied to the channel. Mode letters that take an
//! argument on this server consume one even when we do not track them,
//! so later arguments stay aligned.

use super::super::{Context, Handler, HandlerResult};
use crate::state::ModeSpec;
use slirc_proto::{ChannelExt, Line};
use tracing::debug;

/// Membership privilege changes in a channel mode string.
///
/// Returns `(adding, mode, nick)` for every `o` and `v` change, in order.
/// Missing arguments end the walk.
pub fn mode_changes<'a>(
    spec: &ModeSpec,
    modes: &str,
    args: impl IntoIterator<Item = &'a str>,
) -> Vec<(bool, char, &'a str)> {
    let mut args = args.into_iter();
    let mut adding = true;
    let mut changes = Vec::new();

    for c in modes.chars() {
        match c {
            '+' => adding = true,
            '-' => adding = false,
            _ if !spec.takes_arg(c, adding) => {}
            _ => {
                let Some(arg) = args.next() else {
                    break;
                };
                if matches!(c, 'o' | 'v') {
                    changes.push((adding, c, arg));
                }
            }
        }
    }
    changes
}

pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // MODE <target> <modes> [args...]
        let (Some(target), Some(modes)) = (line.param(0), line.param(1)) else {
            return Ok(());
        };

        if !target.is_channel_name() {
            // Our own user modes; other non-channel targets are ignored.
            if ctx.session.is_own_nick(target) {
                ctx.session.ensure_user(target).apply_modes(modes);
                debug!(modes = %modes, "User modes changed");
            }
            return Ok(());
        }

        let args = line.params[2..].iter().map(String::as_str);
        let changes = mode_changes(ctx.session.mode_spec(), modes, args);

        for &(adding, mode, nick) in &changes {
            match mode {
                'o' => ctx.session.set_op(target, nick, adding),
                _ => ctx.session.set_voice(target, nick, adding),
            }
            let flag = format!("{}{mode}", if adding { '+' } else { '-' });
            ctx.hooks.on_mode(ctx.commands, nick, target, &flag);
        }

        for &(_, _, nick) in &changes {
            ctx.refresh_whois(nick)?;
        }
        Ok(())
    }
}

/// 221 RPL_UMODEIS: the full user mode set for our own nick.
pub struct UmodeHandler;

impl Handler for UmodeHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // 221 <me> <modes>
        let (Some(me), Some(modes)) = (line.param(0), line.param(1)) else {
            return Ok(());
        };
        let user = ctx.session.ensure_user(me);
        user.modes.clear();
        user.apply_modes(modes);
        Ok(())
    }
}
