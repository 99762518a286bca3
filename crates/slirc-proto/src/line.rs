//! Decoded protocol lines.
//!
//! [`Line::parse`] is deliberately lenient: it never returns an error and
//! degrades malformed input to empty fields so the line can still be shown.

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::prefix::Prefix;
use crate::response::Response;
use crate::tags::parse_tags;

/// One decoded (or synthesised) protocol line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Unique per decode.
    pub id: Uuid,
    /// Milliseconds since the Unix epoch at construction.
    pub timestamp: i64,
    /// Original text, without the line terminator.
    pub raw: String,
    /// Origin of the line, without the leading colon.
    pub prefix: Option<String>,
    /// Verb (`PRIVMSG`) or three-digit numeric (`353`).
    pub command: String,
    /// Parameters; the last one may contain spaces.
    pub params: Vec<String>,
    /// IRCv3 message tags, empty when absent.
    pub tags: BTreeMap<String, String>,
}

impl Line {
    /// Decode one raw line.
    ///
    /// A leading `@tags` section and a leading `:prefix` are split off first.
    /// The next token is the command. The first following token that starts
    /// with `:` begins the trailing parameter, which runs to the end of the
    /// line with its spacing preserved.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_end_matches(['\r', '\n']);
        let mut rest = raw;

        let mut tags = BTreeMap::new();
        if let Some(stripped) = rest.strip_prefix('@') {
            let (section, tail) = split_token(stripped);
            tags = parse_tags(section);
            rest = tail;
        }

        let mut prefix = None;
        if let Some(stripped) = rest.strip_prefix(':') {
            let (origin, tail) = split_token(stripped);
            prefix = Some(origin.to_owned());
            rest = tail;
        }

        let (command, mut rest) = split_token(rest.trim_start_matches(' '));

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_owned());
                break;
            }
            let (param, tail) = split_token(rest);
            params.push(param.to_owned());
            rest = tail;
        }

        Self::build(raw.to_owned(), prefix, command.to_owned(), params, tags)
    }

    /// Build a display line derived from another event.
    ///
    /// Derived lines get a fresh id and timestamp and carry no tags.
    pub fn derive(
        command: impl Into<String>,
        raw: impl Into<String>,
        params: Vec<String>,
        prefix: Option<String>,
    ) -> Self {
        Self::build(
            raw.into(),
            prefix,
            command.into(),
            params,
            BTreeMap::new(),
        )
    }

    fn build(
        raw: String,
        prefix: Option<String>,
        command: String,
        params: Vec<String>,
        tags: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            raw,
            prefix,
            command,
            params,
            tags,
        }
    }

    /// Parameter `n`, if present.
    pub fn param(&self, n: usize) -> Option<&str> {
        self.params.get(n).map(String::as_str)
    }

    /// Last parameter, if any.
    pub fn trailing(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }

    /// Nickname part of the prefix (everything before `!` or `@`).
    ///
    /// Server prefixes yield the server name, matching how the prefix is
    /// displayed as a sender.
    pub fn source_nick(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        let nick = prefix.split(['!', '@']).next().unwrap_or_default();
        (!nick.is_empty()).then_some(nick)
    }

    /// Structured view of the prefix.
    pub fn source(&self) -> Option<Prefix> {
        self.prefix.as_deref().map(Prefix::new_from_str)
    }

    /// Whether the command is a three-digit numeric reply.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }

    /// Known numeric reply for this line, if any.
    pub fn response(&self) -> Option<Response> {
        if !self.is_numeric() {
            return None;
        }
        self.command.parse().ok().and_then(Response::from_code)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Line {
    fn from(raw: &str) -> Self {
        Line::parse(raw)
    }
}

/// Split at the first space; the remainder excludes that space.
fn split_token(s: &str) -> (&str, &str) {
    match s.split_once(' ') {
        Some((token, rest)) => (token, rest),
        None => (s, ""),
    }
}
