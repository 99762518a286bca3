//! Channel-related types and state.

use serde::Serialize;
use std::collections::BTreeSet;

/// Privileges tracked per channel member.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemberModes {
    /// `+o`, shown as `@`.
    pub op: bool,
    /// `+v`, shown as `+`.
    pub voice: bool,
}

impl MemberModes {
    /// Get the highest prefix character for this member.
    pub fn prefix_char(&self) -> Option<char> {
        if self.op {
            Some('@')
        } else if self.voice {
            Some('+')
        } else {
            None
        }
    }
}

/// Split a NAMES (or WHOIS channel list) entry into privileges and name.
///
/// Handles multi-prefix (`@+nick`) and userhost-in-names (`nick!u@h`).
/// `~` and `&` count as op; `%` is recognised but not tracked.
pub fn parse_member_entry(entry: &str) -> (MemberModes, &str) {
    let mut modes = MemberModes::default();
    let name = entry.trim_start_matches(|c: char| match c {
        '~' | '&' | '@' => {
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
    let name = name.split('!').next().unwrap_or(name);
    (modes, name)
}

/// Channel state.
///
/// `ops` and `voice` are always subsets of `users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub name: String,
    pub topic: Option<String>,
    pub topic_set_by: Option<String>,
    /// Unix seconds.
    pub topic_set_at: Option<i64>,
    users: BTreeSet<String>,
    ops: BTreeSet<String>,
    voice: BTreeSet<String>,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn users(&self) -> &BTreeSet<String> {
        &self.users
    }

    pub fn ops(&self) -> &BTreeSet<String> {
        &self.ops
    }

    pub fn voice(&self) -> &BTreeSet<String> {
        &self.voice
    }

    pub fn has_user(&self, nick: &str) -> bool {
        self.users.contains(nick)
    }

    pub fn is_op(&self, nick: &str) -> bool {
        self.ops.contains(nick)
    }

    pub fn has_voice(&self, nick: &str) -> bool {
        self.voice.contains(nick)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn member_modes(&self, nick: &str) -> MemberModes {
        MemberModes {
            op: self.is_op(nick),
            voice: self.has_voice(nick),
        }
    }

    pub(crate) fn add_user(&mut self, nick: &str) {
        if !self.users.contains(nick) {
            self.users.insert(nick.to_owned());
        }
    }

    /// Remove a member together with its privileges.
    pub(crate) fn remove_user(&mut self, nick: &str) -> bool {
        self.ops.remove(nick);
        self.voice.remove(nick);
        self.users.remove(nick)
    }

    /// Grant or revoke op. Granting also makes the nick a member.
    pub(crate) fn set_op(&mut self, nick: &str, on: bool) {
        if on {
            self.add_user(nick);
            self.ops.insert(nick.to_owned());
        } else {
            self.ops.remove(nick);
        }
    }

    /// Grant or revoke voice. Granting also makes the nick a member.
    pub(crate) fn set_voice(&mut self, nick: &str, on: bool) {
        if on {
            self.add_user(nick);
            self.voice.insert(nick.to_owned());
        } else {
            self.voice.remove(nick);
        }
    }

    /// Move a member to a new nick, keeping its privileges.
    pub(crate) fn rename_user(&mut self, old: &str, new: &str) {
        let modes = self.member_modes(old);
        if !self.remove_user(old) {
            return;
        }
        self.add_user(new);
        self.set_op(new, modes.op);
        self.set_voice(new, modes.voice);
    }

    /// Drop every member; returns the nicks that were present.
    pub(crate) fn clear_members(&mut self) -> BTreeSet<String> {
        self.ops.clear();
        self.voice.clear();
        std::mem::take(&mut self.users)
    }

    /// Member list with privilege prefixes, ops first, then voiced, then
    /// everyone else, e.g. `@alice, +bob, carol`.
    pub fn format_user_list(&self) -> String {
        let rank = |nick: &str| match self.member_modes(nick).prefix_char() {
            Some('@') => 0,
            Some(_) => 1,
            None => 2,
        };
        let mut members: Vec<&String> = self.users.iter().collect();
        members.sort_by_key(|nick| rank(nick));
        members
            .into_iter()
            .map(|nick| match self.member_modes(nick).prefix_char() {
                Some(prefix) => format!("{prefix}{nick}"),
                None => nick.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
