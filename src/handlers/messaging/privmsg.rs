//! PRIVMSG and NOTICE handler.
//!
//! Channel messages make sure the sender is tracked as a member. Anything
//! else is a direct message: the sender is tracked as a user and, for
//! PRIVMSG, the private-message hook fires so the application can open a
//! view for the conversation. Lines from servers are left alone.

use super::super::{Context, Handler, HandlerResult};
use slirc_proto::{ChannelExt, Line, Prefix};

pub struct PrivmsgHandler;

/// The sender's nick, if the prefix names a user.
///
/// Only `nick!user@host` style prefixes count. A bare name is a server,
/// dotted (`irc.example.net`) or not (`localhost`).
fn user_sender(prefix: Prefix) -> Option<String> {
    match prefix {
        Prefix::Nickname(nick, user, host)
            if !nick.is_empty() && (!user.is_empty() || !host.is_empty()) =>
        {
            Some(nick)
        }
        _ => None,
    }
}

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // PRIVMSG <target> :<text>
        let (Some(target), Some(_text)) = (line.param(0), line.param(1)) else {
            return Ok(());
        };
        let Some(sender) = line.source().and_then(user_sender) else {
            return Ok(());
        };

        if target.is_channel_name() {
            ctx.session.link(&sender, target);
            return Ok(());
        }

        ctx.session.ensure_user(&sender);
        if line.command.eq_ignore_ascii_case("PRIVMSG") && !ctx.session.is_own_nick(&sender) {
            ctx.hooks.on_privmsg(ctx.commands, &sender);
        }
        Ok(())
    }
}
