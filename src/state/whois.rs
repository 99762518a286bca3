//! WHOIS snapshot aggregated from numeric replies.

use serde::Serialize;

/// Per-user WHOIS detail.
///
/// Each field is written by the numeric that carries it; a second query
/// overwrites the same record field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Whois {
    pub nick: String,
    pub user: Option<String>,
    pub host: Option<String>,
    pub real_name: Option<String>,
    pub server: Option<String>,
    pub server_info: Option<String>,
    pub idle_seconds: Option<u64>,
    /// Unix seconds.
    pub sign_on_time: Option<i64>,
    /// Channel names as listed by RPL_WHOISCHANNELS, prefixes included.
    pub channels: Vec<String>,
    pub is_operator: bool,
    pub away: bool,
    pub away_message: Option<String>,
    /// Services account (RPL_WHOISACCOUNT).
    pub account: Option<String>,
}

impl Whois {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            ..Self::default()
        }
    }

    /// `user@host` mask, when both parts are known.
    pub fn mask(&self) -> Option<String> {
        match (&self.user, &self.host) {
            (Some(user), Some(host)) => Some(format!("{user}@{host}")),
            _ => None,
        }
    }

    /// Single-line summary for logs.
    pub fn summary(&self) -> String {
        let mut out = self.nick.clone();
        if let Some(mask) = self.mask() {
            out.push_str(&format!(" ({mask})"));
        }
        if let Some(name) = &self.real_name {
            out.push_str(&format!(" \"{name}\""));
        }
        if let Some(server) = &self.server {
            out.push_str(&format!(" on {server}"));
        }
        if let Some(idle) = self.idle_seconds {
            out.push_str(&format!(", idle {idle}s"));
        }
        if !self.channels.is_empty() {
            out.push_str(&format!(", in {}", self.channels.join(" ")));
        }
        if self.is_operator {
            out.push_str(", operator");
        }
        if let Some(msg) = &self.away_message {
            out.push_str(&format!(", away: {msg}"));
        }
        out
    }
}
