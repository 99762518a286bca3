//! User-related types and state.

use super::whois::Whois;
use serde::Serialize;
use std::collections::BTreeSet;

/// A user known to the session, keyed by current nick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub nick: String,
    /// Populated by WHOIS.
    pub real_name: Option<String>,
    /// Names of channels this user is in.
    pub channels: BTreeSet<String>,
    /// Session-wide mode letters.
    pub modes: BTreeSet<char>,
    pub whois: Whois,
}

impl User {
    pub fn new(nick: impl Into<String>) -> Self {
        let nick = nick.into();
        Self {
            whois: Whois::new(nick.clone()),
            nick,
            real_name: None,
            channels: BTreeSet::new(),
            modes: BTreeSet::new(),
        }
    }

    pub fn is_in(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    /// Apply a user mode string such as `+iw-x`.
    pub fn apply_modes(&mut self, modes: &str) {
        let mut adding = true;
        for c in modes.chars() {
            match c {
                '+' => adding = true,
                '-' => adding = false,
                c if adding => {
                    self.modes.insert(c);
                }
                c => {
                    self.modes.remove(&c);
                }
            }
        }
    }

    /// Convert modes to a string like "+iw".
    pub fn mode_string(&self) -> String {
        std::iter::once('+').chain(self.modes.iter().copied()).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
