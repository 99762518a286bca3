//! Chat input: slash commands typed by the user.
//!
//! [`ChatCommand::parse`] turns one line of user input into a command, and
//! [`execute`] carries it out against an [`Engine`] relative to the view the
//! user is looking at. Sent messages are echoed back to that view as local
//! lines; `/users` and `/channels` are answered from the session alone.

use crate::client::Engine;
use crate::error::ClientError;
use crate::handlers::server_line;
use crate::hooks::Target;
use crate::telemetry::spans;
use slirc_proto::{ChannelExt, Ctcp, Line};

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Join { channel: String, key: Option<String> },
    Part { channel: Option<String>, message: Option<String> },
    Msg { target: String, text: String },
    Notice { target: String, text: String },
    Me(String),
    Whois(String),
    Nick(String),
    Topic(Option<String>),
    Quit(Option<String>),
    Raw(String),
    Users(Option<String>),
    Channels,
    /// Plain text for the current view.
    Text(String),
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

impl ChatCommand {
    /// Parse one line of input. Blank input yields `None`.
    ///
    /// A leading `//` sends the rest as text starting with `/`.
    pub fn parse(input: &str) -> Result<Option<ChatCommand>, ClientError> {
        let input = input.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            return Ok(None);
        }
        if input.starts_with("//") {
            return Ok(Some(ChatCommand::Text(input[1..].to_owned())));
        }
        let Some(body) = input.strip_prefix('/') else {
            return Ok(Some(ChatCommand::Text(input.to_owned())));
        };

        let (name, rest) = split_word(body);
        let rest = rest.trim();
        let command = match name.to_ascii_lowercase().as_str() {
            "join" | "j" => {
                let (channel, key) = split_word(rest);
                if channel.is_empty() {
                    return Err(ClientError::NeedMoreParams("join"));
                }
                ChatCommand::Join {
                    channel: channel.to_owned(),
                    key: non_empty(key),
                }
            }
            "part" | "leave" => {
                let (first, tail) = split_word(rest);
                if first.is_channel_name() {
                    ChatCommand::Part {
                        channel: Some(first.to_owned()),
                        message: non_empty(tail),
                    }
                } else {
                    ChatCommand::Part {
                        channel: None,
                        message: non_empty(rest),
                    }
                }
            }
            "msg" | "query" => {
                let (target, text) = split_word(rest);
                if target.is_empty() || text.is_empty() {
                    return Err(ClientError::NeedMoreParams("msg"));
                }
                ChatCommand::Msg {
                    target: target.to_owned(),
                    text: text.to_owned(),
                }
            }
            "notice" => {
                let (target, text) = split_word(rest);
                if target.is_empty() || text.is_empty() {
                    return Err(ClientError::NeedMoreParams("notice"));
                }
                ChatCommand::Notice {
                    target: target.to_owned(),
                    text: text.to_owned(),
                }
            }
            "me" => {
                if rest.is_empty() {
                    return Err(ClientError::NeedMoreParams("me"));
                }
                ChatCommand::Me(rest.to_owned())
            }
            "whois" => {
                let (nick, _) = split_word(rest);
                if nick.is_empty() {
                    return Err(ClientError::NeedMoreParams("whois"));
                }
                ChatCommand::Whois(nick.to_owned())
            }
            "nick" => {
                let (nick, _) = split_word(rest);
                if nick.is_empty() {
                    return Err(ClientError::NeedMoreParams("nick"));
                }
                ChatCommand::Nick(nick.to_owned())
            }
            "topic" => ChatCommand::Topic(non_empty(rest)),
            "quit" | "exit" => ChatCommand::Quit(non_empty(rest)),
            "raw" | "quote" => {
                if rest.is_empty() {
                    return Err(ClientError::NeedMoreParams("raw"));
                }
                ChatCommand::Raw(rest.to_owned())
            }
            "users" | "names" => ChatCommand::Users(non_empty(split_word(rest).0)),
            "channels" => ChatCommand::Channels,
            _ => return Err(ClientError::UnknownCommand(name.to_owned())),
        };
        Ok(Some(command))
    }

    /// Command name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ChatCommand::Join { .. } => "join",
            ChatCommand::Part { .. } => "part",
            ChatCommand::Msg { .. } => "msg",
            ChatCommand::Notice { .. } => "notice",
            ChatCommand::Me(_) => "me",
            ChatCommand::Whois(_) => "whois",
            ChatCommand::Nick(_) => "nick",
            ChatCommand::Topic(_) => "topic",
            ChatCommand::Quit(_) => "quit",
            ChatCommand::Raw(_) => "raw",
            ChatCommand::Users(_) => "users",
            ChatCommand::Channels => "channels",
            ChatCommand::Text(_) => "text",
        }
    }
}

/// Carry out a command relative to the view `current`.
pub fn execute(
    engine: &mut Engine,
    current: &Target,
    command: ChatCommand,
) -> Result<Outcome, ClientError> {
    let span = spans::input(command.name(), current_name(current));
    let _enter = span.enter();

    match command {
        ChatCommand::Join { channel, key } => engine.commands().join(&channel, key.as_deref())?,
        ChatCommand::Part { channel, message } => {
            let channel = channel
                .or_else(|| current_channel(current))
                .ok_or(ClientError::NoTarget)?;
            engine.commands().part(&channel, message.as_deref())?;
        }
        ChatCommand::Msg { target, text } => send_privmsg(engine, &target, &text)?,
        ChatCommand::Notice { target, text } => {
            engine.commands().notice(&target, &text)?;
            echo(engine, "NOTICE", &target, &text);
        }
        ChatCommand::Me(text) => {
            let target = current_name(current).ok_or(ClientError::NoTarget)?.to_owned();
            engine.commands().action(&target, &text)?;
            echo(engine, "PRIVMSG", &target, &Ctcp::action(&text).to_string());
        }
        ChatCommand::Whois(nick) => engine.commands().whois(&nick)?,
        ChatCommand::Nick(nick) => engine.commands().nick(&nick)?,
        ChatCommand::Topic(text) => {
            let channel = current_channel(current).ok_or(ClientError::NoTarget)?;
            engine.commands().topic(&channel, text.as_deref())?;
        }
        ChatCommand::Quit(message) => {
            engine.commands().quit(message.as_deref())?;
            return Ok(Outcome::Quit);
        }
        ChatCommand::Raw(line) => engine.commands().input(&line)?,
        ChatCommand::Users(channel) => {
            let channel = channel
                .or_else(|| current_channel(current))
                .ok_or(ClientError::NoTarget)?;
            let text = match engine.session().format_user_list(&channel) {
                Some(list) => format!("Users in {channel}: {list}"),
                None => format!("Not tracking {channel}"),
            };
            engine.push_local(current.clone(), server_line("USERS", text, vec![channel]));
        }
        ChatCommand::Channels => {
            let names = engine.session().channel_names();
            let text = if names.is_empty() {
                "No channels".to_owned()
            } else {
                format!("Channels: {}", names.join(", "))
            };
            engine.push_local(current.clone(), server_line("CHANNELS", text, names));
        }
        ChatCommand::Text(text) => {
            let target = current_name(current).ok_or(ClientError::NoTarget)?.to_owned();
            send_privmsg(engine, &target, &text)?;
        }
    }
    Ok(Outcome::Continue)
}

fn send_privmsg(engine: &mut Engine, target: &str, text: &str) -> Result<(), ClientError> {
    engine.commands().msg(target, text)?;
    echo(engine, "PRIVMSG", target, text);
    Ok(())
}

/// Show what we sent, attributed to our own nick, in the target's view.
fn echo(engine: &mut Engine, command: &str, target: &str, text: &str) {
    let raw = match engine.session().nick() {
        Some(nick) => format!(":{nick} {command} {target} :{text}"),
        None => format!("{command} {target} :{text}"),
    };
    let view = if target.is_channel_name() {
        Target::Channel(target.to_owned())
    } else {
        Target::Private(target.to_owned())
    };
    engine.push_local(view, Line::parse(&raw));
}

fn current_name(current: &Target) -> Option<&str> {
    match current {
        Target::Console => None,
        Target::Channel(name) | Target::Private(name) => Some(name),
    }
}

fn current_channel(current: &Target) -> Option<String> {
    match current {
        Target::Channel(name) => Some(name.clone()),
        _ => None,
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(' ') {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}
