//! Outgoing commands and their wire rendering.
//!
//! Every command renders as `COMMAND p1 p2 :trailing`. Message bodies,
//! reasons, realnames and topics always take the colon; other parameter
//! lists only colon-prefix the last one when it would otherwise be
//! misparsed.

use std::fmt::{self, Write};

/// Truncate text at the first line break.
///
/// Keeps a parameter from smuggling a second protocol line onto the wire.
pub fn sanitize(text: &str) -> &str {
    match text.find(['\r', '\n']) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// An outgoing client command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// PASS password
    PASS(String),
    /// NICK nickname
    NICK(String),
    /// USER username mode * :realname
    USER(String, String, String),
    /// JOIN channel [key]
    JOIN(String, Option<String>),
    /// PART channel [:message]
    PART(String, Option<String>),
    /// PRIVMSG target :text
    PRIVMSG(String, String),
    /// NOTICE target :text
    NOTICE(String, String),
    /// WHOIS nick
    WHOIS(String),
    /// QUIT [:message]
    QUIT(Option<String>),
    /// PONG echoing the PING parameters
    PONG(Vec<String>),
    /// TOPIC channel [:topic]
    TOPIC(String, Option<String>),
    /// MODE target [modes [args...]]
    MODE(String, Vec<String>),
    /// KICK channel nick [:reason]
    KICK(String, String, Option<String>),
    /// NAMES [channel]
    NAMES(Option<String>),
    /// Pre-rendered line sent as-is (after sanitizing).
    Raw(String),
}

impl Command {
    /// The command verb.
    pub fn verb(&self) -> &str {
        match self {
            Command::PASS(_) => "PASS",
            Command::NICK(_) => "NICK",
            Command::USER(..) => "USER",
            Command::JOIN(..) => "JOIN",
            Command::PART(..) => "PART",
            Command::PRIVMSG(..) => "PRIVMSG",
            Command::NOTICE(..) => "NOTICE",
            Command::WHOIS(_) => "WHOIS",
            Command::QUIT(_) => "QUIT",
            Command::PONG(_) => "PONG",
            Command::TOPIC(..) => "TOPIC",
            Command::MODE(..) => "MODE",
            Command::KICK(..) => "KICK",
            Command::NAMES(_) => "NAMES",
            Command::Raw(raw) => sanitize(raw).split(' ').next().unwrap_or_default(),
        }
    }
}

fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Write a command whose last argument gets a colon only when required.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, middle)) = args.split_last() else {
        return Ok(());
    };
    for arg in middle {
        f.write_char(' ')?;
        f.write_str(sanitize(arg))?;
    }
    f.write_char(' ')?;
    let last = sanitize(last);
    if needs_colon_prefix(last) {
        f.write_char(':')?;
    }
    f.write_str(last)
}

/// Write a command whose last argument is free-form text.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, middle)) = args.split_last() else {
        return Ok(());
    };
    for arg in middle {
        f.write_char(' ')?;
        f.write_str(sanitize(arg))?;
    }
    f.write_str(" :")?;
    f.write_str(sanitize(last))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write_cmd(f, "PASS", &[p]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::USER(u, m, r) => write_cmd_freeform(f, "USER", &[u, m, "*", r]),
            Command::JOIN(c, Some(k)) => write_cmd(f, "JOIN", &[c, k]),
            Command::JOIN(c, None) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c, Some(m)) => write_cmd_freeform(f, "PART", &[c, m]),
            Command::PART(c, None) => write_cmd(f, "PART", &[c]),
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::NOTICE(t, m) => write_cmd_freeform(f, "NOTICE", &[t, m]),
            Command::WHOIS(n) => write_cmd(f, "WHOIS", &[n]),
            Command::QUIT(Some(m)) => write_cmd_freeform(f, "QUIT", &[m]),
            Command::QUIT(None) => write_cmd(f, "QUIT", &[]),
            Command::PONG(params) => {
                let params: Vec<&str> = params.iter().map(String::as_str).collect();
                write_cmd(f, "PONG", &params)
            }
            Command::TOPIC(c, Some(t)) => write_cmd_freeform(f, "TOPIC", &[c, t]),
            Command::TOPIC(c, None) => write_cmd(f, "TOPIC", &[c]),
            Command::MODE(target, modes) => {
                let mut args = vec![target.as_str()];
                args.extend(modes.iter().map(String::as_str));
                write_cmd(f, "MODE", &args)
            }
            Command::KICK(c, n, Some(r)) => write_cmd_freeform(f, "KICK", &[c, n, r]),
            Command::KICK(c, n, None) => write_cmd(f, "KICK", &[c, n]),
            Command::NAMES(Some(c)) => write_cmd(f, "NAMES", &[c]),
            Command::NAMES(None) => write_cmd(f, "NAMES", &[]),
            Command::Raw(raw) => f.write_str(sanitize(raw)),
        }
    }
}
