//! 001 RPL_WELCOME handler.
//!
//! The first parameter of the welcome numeric is the nick the server
//! registered us under, which may differ from the one we asked for.

use super::super::{Context, Handler, HandlerResult};
use slirc_proto::Line;
use tracing::info;

pub struct WelcomeHandler;

impl Handler for WelcomeHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        let Some(nick) = line.param(0).filter(|n| !n.is_empty()) else {
            return Ok(());
        };

        ctx.session.set_nick(nick);
        ctx.session.ensure_user(nick);
        info!(nick = %nick, "Registered with server");

        ctx.hooks.on_welcome(ctx.commands, nick);
        ctx.refresh_whois(nick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::Harness;

    #[test]
    fn test_welcome_sets_nick() {
        let mut h = Harness::new().with_refresh();
        h.run(&WelcomeHandler, ":irc.aries 001 jesse :Welcome to the network");

        assert_eq!(h.session.nick(), Some("jesse"));
        assert!(h.session.user("jesse").is_some());
        assert_eq!(h.hooks.calls, vec!["welcome jesse"]);
        assert_eq!(h.sent(), vec!["WHOIS jesse"]);
    }

    #[test]
    fn test_welcome_without_nick() {
        let mut h = Harness::new();
        h.run(&WelcomeHandler, ":irc.aries 001");
        assert_eq!(h.session.nick(), None);
        assert!(h.hooks.calls.is_empty());
    }
}
