//! Presentation surface: application hooks, the line sink and routing.
//!
//! Hooks run synchronously inside the handler that triggers them, after the
//! session mutation, so they always observe post-mutation state. They get a
//! [`Commands`] handle to issue follow-up commands.

use crate::client::Commands;
use parking_lot::Mutex;
use slirc_proto::{ChannelExt, Ctcp, Line};
use std::fmt;
use std::sync::Arc;

/// Callbacks into the surrounding application. All default to no-ops.
pub trait Hooks: Send {
    /// The client itself joined a channel.
    fn on_join_channel(&mut self, _commands: &Commands, _channel: &str) {}

    /// RPL_WHOISUSER delivered a realname for a nick.
    fn on_whois(&mut self, _commands: &Commands, _nick: &str, _realname: &str) {}

    /// A user changed nick.
    fn on_nick(&mut self, _commands: &Commands, _old: &str, _new: &str) {}

    /// RPL_WELCOME named our nick.
    fn on_welcome(&mut self, _commands: &Commands, _nick: &str) {}

    /// The server greeting completed.
    fn on_ready(&mut self, _commands: &Commands) {}

    /// A private message arrived from `from`.
    fn on_privmsg(&mut self, _commands: &Commands, _from: &str) {}

    /// A channel privilege changed (`mode` is e.g. `+o`).
    fn on_mode(&mut self, _commands: &Commands, _nick: &str, _channel: &str, _mode: &str) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl Hooks for NoopHooks {}

/// Shared hooks, so the application can keep a handle to its own state.
impl<H: Hooks> Hooks for Arc<Mutex<H>> {
    fn on_join_channel(&mut self, commands: &Commands, channel: &str) {
        self.lock().on_join_channel(commands, channel);
    }

    fn on_whois(&mut self, commands: &Commands, nick: &str, realname: &str) {
        self.lock().on_whois(commands, nick, realname);
    }

    fn on_nick(&mut self, commands: &Commands, old: &str, new: &str) {
        self.lock().on_nick(commands, old, new);
    }

    fn on_welcome(&mut self, commands: &Commands, nick: &str) {
        self.lock().on_welcome(commands, nick);
    }

    fn on_ready(&mut self, commands: &Commands) {
        self.lock().on_ready(commands);
    }

    fn on_privmsg(&mut self, commands: &Commands, from: &str) {
        self.lock().on_privmsg(commands, from);
    }

    fn on_mode(&mut self, commands: &Commands, nick: &str, channel: &str, mode: &str) {
        self.lock().on_mode(commands, nick, channel, mode);
    }
}

/// Where a line is shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Console,
    Channel(String),
    Private(String),
}

impl Target {
    /// Route an inbound (or locally echoed) line.
    ///
    /// PRIVMSG goes to its channel, or to a private view named after the
    /// sender (the target for prefix-less echoes). MODE on a channel goes to
    /// the channel. Everything else lands on the console.
    pub fn for_line(line: &Line) -> Target {
        let target = line.param(0);
        match line.command.as_str() {
            "PRIVMSG" => match target {
                Some(t) if t.is_channel_name() => Target::Channel(t.to_owned()),
                _ => {
                    let peer = line.source_nick().or(target).unwrap_or("unknown");
                    Target::Private(peer.to_owned())
                }
            },
            "MODE" => match target {
                Some(t) if t.is_channel_name() => Target::Channel(t.to_owned()),
                _ => Target::Console,
            },
            _ => Target::Console,
        }
    }

    /// Stable string key, e.g. `channel-#rust`.
    pub fn key(&self) -> String {
        match self {
            Target::Console => "console".to_owned(),
            Target::Channel(name) => format!("channel-{name}"),
            Target::Private(nick) => format!("pm-{nick}"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Console => f.write_str("console"),
            Target::Channel(name) => f.write_str(name),
            Target::Private(nick) => write!(f, "@{nick}"),
        }
    }
}

/// Display context a line is classified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Console,
    Channel,
    Private,
}

impl From<&Target> for View {
    fn from(target: &Target) -> Self {
        match target {
            Target::Console => View::Console,
            Target::Channel(_) => View::Channel,
            Target::Private(_) => View::Private,
        }
    }
}

/// Visual class of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Message,
    Notice,
    Event,
    Server,
    Action,
}

impl LineKind {
    pub fn classify(line: &Line, view: View) -> LineKind {
        let command = line.command.as_str();
        let is_event = matches!(command, "JOIN" | "PART" | "QUIT" | "MODE" | "KICK" | "NICK");
        let is_notice = command == "NOTICE";
        let is_topic = matches!(command, "TOPIC" | "332" | "333");
        let is_action = command == "PRIVMSG"
            && line
                .param(1)
                .and_then(Ctcp::action_text)
                .is_some_and(|text| !text.is_empty());
        let from_server = line.source().is_some_and(|p| p.is_server());

        match view {
            View::Console if from_server && line.is_numeric() => LineKind::Server,
            View::Console if is_notice || is_topic => LineKind::Notice,
            View::Console => LineKind::Message,
            View::Channel if is_action => LineKind::Action,
            View::Channel if is_event => LineKind::Event,
            View::Channel if is_notice || is_topic => LineKind::Notice,
            View::Channel => LineKind::Message,
            View::Private if is_action => LineKind::Action,
            View::Private if command == "PRIVMSG" => LineKind::Message,
            View::Private => LineKind::Notice,
        }
    }
}

/// Receives every line the engine wants shown.
pub trait LineSink: Send {
    /// Default forwarding of an inbound line.
    fn draw(&mut self, target: Target, line: &Line);

    /// A derived line built by a handler or a local echo.
    fn push(&mut self, target: Target, line: Line);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LineSink for NullSink {
    fn draw(&mut self, _target: Target, _line: &Line) {}
    fn push(&mut self, _target: Target, _line: Line) {}
}

impl<S: LineSink> LineSink for Arc<Mutex<S>> {
    fn draw(&mut self, target: Target, line: &Line) {
        self.lock().draw(target, line);
    }

    fn push(&mut self, target: Target, line: Line) {
        self.lock().push(target, line);
    }
}

/// How a buffered line reached the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Drawn,
    Pushed,
}

/// Sink that keeps lines in memory, for embedders that poll.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    entries: Vec<(Target, Origin, Line)>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Target, Origin, Line)] {
        &self.entries
    }

    pub fn take(&mut self) -> Vec<(Target, Origin, Line)> {
        std::mem::take(&mut self.entries)
    }

    /// Raw text of every line routed to `target`, in order.
    pub fn lines_for(&self, target: &Target) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(t, _, _)| t == target)
            .map(|(_, _, line)| line.raw.as_str())
            .collect()
    }

    /// Raw text of pushed (derived) lines only.
    pub fn pushed(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, origin, _)| *origin == Origin::Pushed)
            .map(|(_, _, line)| line.raw.as_str())
            .collect()
    }
}

impl LineSink for BufferSink {
    fn draw(&mut self, target: Target, line: &Line) {
        self.entries.push((target, Origin::Drawn, line.clone()));
    }

    fn push(&mut self, target: Target, line: Line) {
        self.entries.push((target, Origin::Pushed, line));
    }
}
