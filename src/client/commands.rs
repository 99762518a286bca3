//! Command encoder: one method per outgoing action.
//!
//! Every method renders the wire line and hands it to the [`Outbox`];
//! all of them fail with [`ClientError::NotConnected`] when no connection
//! is attached.

use super::outbox::Outbox;
use crate::error::ClientError;
use slirc_proto::{Command, Ctcp};

/// Cloneable handle for issuing commands.
#[derive(Clone, Debug, Default)]
pub struct Commands {
    outbox: Outbox,
}

impl Commands {
    pub fn new(outbox: Outbox) -> Self {
        Self { outbox }
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    pub fn is_connected(&self) -> bool {
        self.outbox.is_connected()
    }

    /// Send a raw protocol line.
    pub fn input(&self, text: &str) -> Result<(), ClientError> {
        self.outbox.send(text)
    }

    pub fn send(&self, command: Command) -> Result<(), ClientError> {
        self.outbox.send(&command.to_string())
    }

    pub fn join(&self, channel: &str, key: Option<&str>) -> Result<(), ClientError> {
        self.send(Command::JOIN(channel.to_owned(), key.map(str::to_owned)))
    }

    pub fn part(&self, channel: &str, message: Option<&str>) -> Result<(), ClientError> {
        self.send(Command::PART(channel.to_owned(), message.map(str::to_owned)))
    }

    pub fn msg(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.send(Command::PRIVMSG(target.to_owned(), text.to_owned()))
    }

    /// `/me`: a PRIVMSG wrapped in the CTCP ACTION envelope.
    pub fn action(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.msg(target, &Ctcp::action(text).to_string())
    }

    pub fn notice(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.send(Command::NOTICE(target.to_owned(), text.to_owned()))
    }

    pub fn whois(&self, nick: &str) -> Result<(), ClientError> {
        self.send(Command::WHOIS(nick.to_owned()))
    }

    pub fn quit(&self, message: Option<&str>) -> Result<(), ClientError> {
        self.send(Command::QUIT(message.map(str::to_owned)))
    }

    pub fn nick(&self, nick: &str) -> Result<(), ClientError> {
        self.send(Command::NICK(nick.to_owned()))
    }

    pub fn topic(&self, channel: &str, topic: Option<&str>) -> Result<(), ClientError> {
        self.send(Command::TOPIC(channel.to_owned(), topic.map(str::to_owned)))
    }

    pub fn mode(&self, target: &str, modes: &[&str]) -> Result<(), ClientError> {
        self.send(Command::MODE(
            target.to_owned(),
            modes.iter().map(|m| (*m).to_owned()).collect(),
        ))
    }

    pub fn kick(&self, channel: &str, nick: &str, reason: Option<&str>) -> Result<(), ClientError> {
        self.send(Command::KICK(
            channel.to_owned(),
            nick.to_owned(),
            reason.map(str::to_owned),
        ))
    }

    pub fn names(&self, channel: Option<&str>) -> Result<(), ClientError> {
        self.send(Command::NAMES(channel.map(str::to_owned)))
    }

    pub fn pong(&self, params: Vec<String>) -> Result<(), ClientError> {
        self.send(Command::PONG(params))
    }

    pub fn pass(&self, password: &str) -> Result<(), ClientError> {
        self.send(Command::PASS(password.to_owned()))
    }

    /// Registration USER line with mode `0`.
    pub fn user(&self, username: &str, realname: &str) -> Result<(), ClientError> {
        self.send(Command::USER(
            username.to_owned(),
            "0".to_owned(),
            realname.to_owned(),
        ))
    }
}
