//! WHOIS reply handler.
//!
//! One handler is registered for the whole WHOIS numeric family. Each reply
//! merges the fields it carries into the addressed user's record.

use super::super::{Context, Handler, HandlerResult};
use crate::state::MemberModes;
use slirc_proto::{ChannelExt, Line, Response};
use tracing::debug;

pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        let Some(nick) = line.param(1).filter(|n| !n.is_empty()) else {
            return Ok(());
        };
        let Some(response) = line.response() else {
            return Ok(());
        };

        match response {
            Response::RPL_WHOISUSER => {
                // 311 <me> <nick> <user> <host> * :<realname>
                let realname = line.param(5);
                let whois = ctx.session.whois_mut(nick);
                whois.user = line.param(2).map(str::to_owned);
                whois.host = line.param(3).map(str::to_owned);
                whois.real_name = realname.map(str::to_owned);

                if let Some(realname) = realname {
                    ctx.session.ensure_user(nick).real_name = Some(realname.to_owned());
                    ctx.hooks.on_whois(ctx.commands, nick, realname);
                }
            }
            Response::RPL_WHOISSERVER => {
                // 312 <me> <nick> <server> :<info>
                let whois = ctx.session.whois_mut(nick);
                whois.server = line.param(2).map(str::to_owned);
                whois.server_info = line.param(3).map(str::to_owned);
            }
            Response::RPL_WHOISOPERATOR => {
                ctx.session.whois_mut(nick).is_operator = true;
            }
            Response::RPL_WHOISIDLE => {
                // 317 <me> <nick> <idle> <signon> :seconds idle, signon time
                let whois = ctx.session.whois_mut(nick);
                whois.idle_seconds = line.param(2).and_then(|s| s.parse().ok());
                whois.sign_on_time = line.param(3).and_then(|s| s.parse().ok());
            }
            Response::RPL_WHOISCHANNELS => {
                // 319 <me> <nick> :{[@+]<channel>}
                let entries: Vec<&str> = line.param(2).unwrap_or("").split_whitespace().collect();
                ctx.session.whois_mut(nick).channels =
                    entries.iter().map(|e| (*e).to_owned()).collect();

                for entry in entries {
                    let (modes, channel) = split_whois_channel(entry);
                    if !channel.is_channel_name() {
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
            }
            Response::RPL_WHOISACCOUNT => {
                // 330 <me> <nick> <account> :is logged in as
                ctx.session.whois_mut(nick).account = line.param(2).map(str::to_owned);
            }
            Response::RPL_AWAY => {
                // 301 <me> <nick> :<message>
                let whois = ctx.session.whois_mut(nick);
                whois.away = true;
                whois.away_message = line.param(2).map(str::to_owned);
            }
            Response::RPL_ENDOFWHOIS => {
                if let Some(user) = ctx.session.user(nick) {
                    debug!(nick = %nick, whois = %user.whois.summary(), "[318] WHOIS completed");
                }
            }
            other => {
                debug!(numeric = %other, "Unhandled WHOIS numeric");
            }
        }
        Ok(())
    }
}

/// Strip membership prefixes from a RPL_WHOISCHANNELS entry.
///
/// `&` is left alone here since it is also a channel prefix.
fn split_whois_channel(entry: &str) -> (MemberModes, &str) {
    let mut modes = MemberModes::default();
    let channel = entry.trim_start_matches(|c: char| match c {
        '~' | '@' => {
            modes.op = true;
            true
        }
        '+' => {
            modes.voice = true;
            true
        }
        '%' => true,
        _ => false,
    });
    (modes, channel)
}
