//! Session aggregate: user and channel directories plus readiness.
//!
//! Users are keyed by current nick and channels by name. Membership is
//! stored on both sides as keys, so every mutation here updates the user
//! side and the channel side together.

use super::channel::Channel;
use super::modes::ModeSpec;
use super::user::User;
use super::whois::Whois;
use crate::client::readiness::ReadinessGate;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Per-connection session state.
#[derive(Debug, Default)]
pub struct Session {
    users: HashMap<String, User>,
    channels: HashMap<String, Channel>,
    nick: Option<String>,
    /// Channels the client itself has joined.
    joined: BTreeSet<String>,
    /// Channels inside a NAMES resync (first 353 seen, 366 not yet).
    names_pending: HashSet<String>,
    /// Mode argument rules advertised by the server.
    modes: ModeSpec,
    pub(crate) gate: ReadinessGate,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // === Identity ===

    /// The client's own current nick, once the server has told us.
    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    pub fn set_nick(&mut self, nick: impl Into<String>) {
        self.nick = Some(nick.into());
    }

    pub fn is_own_nick(&self, nick: &str) -> bool {
        self.nick.as_deref() == Some(nick)
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// Set the ready flag. Returns `true` on the transition.
    pub fn mark_ready(&mut self) -> bool {
        self.gate.mark_ready()
    }

    pub fn mode_spec(&self) -> &ModeSpec {
        &self.modes
    }

    pub fn mode_spec_mut(&mut self) -> &mut ModeSpec {
        &mut self.modes
    }

    // === Lookups ===

    pub fn user(&self, nick: &str) -> Option<&User> {
        self.users.get(nick)
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Known channel names, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.keys().cloned().collect();
        names.sort();
        names
    }

    /// Channels the client itself is in.
    pub fn joined_channels(&self) -> &BTreeSet<String> {
        &self.joined
    }

    pub fn has_joined(&self, channel: &str) -> bool {
        self.joined.contains(channel)
    }

    /// `@alice, +bob, carol` for a known channel.
    pub fn format_user_list(&self, channel: &str) -> Option<String> {
        self.channels.get(channel).map(Channel::format_user_list)
    }

    // === Directory mutation ===

    /// Locate or create a user.
    pub fn ensure_user(&mut self, nick: &str) -> &mut User {
        self.users
            .entry(nick.to_owned())
            .or_insert_with(|| User::new(nick))
    }

    /// Locate or create a channel.
    pub fn ensure_channel(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(name.to_owned())
            .or_insert_with(|| Channel::new(name))
    }

    /// Link a user and a channel in both directions, creating either.
    pub fn link(&mut self, nick: &str, channel: &str) {
        self.ensure_channel(channel).add_user(nick);
        self.ensure_user(nick).channels.insert(channel.to_owned());
    }

    /// Unlink a user from a channel in both directions.
    ///
    /// A channel left without members is evicted. Returns whether the user
    /// was a member.
    pub fn unlink(&mut self, nick: &str, channel: &str) -> bool {
        if let Some(user) = self.users.get_mut(nick) {
            user.channels.remove(channel);
        }
        let removed = self
            .channels
            .get_mut(channel)
            .is_some_and(|chan| chan.remove_user(nick));
        self.evict_if_empty(channel);
        removed
    }

    /// Record that the client joined a channel.
    pub fn mark_joined(&mut self, channel: &str) {
        self.ensure_channel(channel);
        self.joined.insert(channel.to_owned());
    }

    /// Forget a channel entirely (the client left it).
    pub fn drop_channel(&mut self, name: &str) -> Option<Channel> {
        self.joined.remove(name);
        self.names_pending.remove(name);
        let mut channel = self.channels.remove(name)?;
        for nick in channel.clear_members() {
            if let Some(user) = self.users.get_mut(&nick) {
                user.channels.remove(name);
            }
        }
        debug!(channel = %name, "Dropped channel");
        Some(channel)
    }

    /// Remove a user from every channel and from the directory.
    ///
    /// Returns the channels the user was in.
    pub fn remove_user(&mut self, nick: &str) -> Vec<String> {
        let Some(user) = self.users.remove(nick) else {
            return Vec::new();
        };
        let channels: Vec<String> = user.channels.into_iter().collect();
        for name in &channels {
            if let Some(chan) = self.channels.get_mut(name) {
                chan.remove_user(nick);
            }
            self.evict_if_empty(name);
        }
        channels
    }

    /// Re-key a user under a new nick and rewrite every membership.
    ///
    /// Also follows the client's own nick. Returns the channels the user is
    /// in under the new nick.
    pub fn rename_user(&mut self, old: &str, new: &str) -> Vec<String> {
        if self.is_own_nick(old) {
            self.nick = Some(new.to_owned());
        }
        if old == new {
            return self
                .users
                .get(old)
                .map(|u| u.channels.iter().cloned().collect())
                .unwrap_or_default();
        }

        let mut user = self.users.remove(old).unwrap_or_else(|| User::new(old));
        user.nick = new.to_owned();
        user.whois.nick = new.to_owned();

        for name in &user.channels {
            if let Some(chan) = self.channels.get_mut(name) {
                chan.rename_user(old, new);
            }
        }

        // An entry already under the new key loses its memberships.
        if let Some(stale) = self.users.remove(new) {
            for name in stale.channels.difference(&user.channels) {
                if let Some(chan) = self.channels.get_mut(name) {
                    chan.remove_user(new);
                }
                self.evict_if_empty(name);
            }
        }

        let channels = user.channels.iter().cloned().collect();
        self.users.insert(new.to_owned(), user);
        channels
    }

    /// Grant or revoke op for a member, linking them if needed.
    pub fn set_op(&mut self, channel: &str, nick: &str, on: bool) {
        self.link(nick, channel);
        self.ensure_channel(channel).set_op(nick, on);
    }

    /// Grant or revoke voice for a member, linking them if needed.
    pub fn set_voice(&mut self, channel: &str, nick: &str, on: bool) {
        self.link(nick, channel);
        self.ensure_channel(channel).set_voice(nick, on);
    }

    // === NAMES resync ===

    /// Start a NAMES resync for a channel unless one is already running.
    ///
    /// The first reply clears existing membership; later replies append.
    /// Returns `true` when membership was cleared.
    pub fn begin_names(&mut self, channel: &str) -> bool {
        if !self.names_pending.insert(channel.to_owned()) {
            return false;
        }
        let members = self.ensure_channel(channel).clear_members();
        for nick in members {
            if let Some(user) = self.users.get_mut(&nick) {
                user.channels.remove(channel);
            }
        }
        true
    }

    /// Close the NAMES resync window for a channel.
    ///
    /// A channel emptied while the window was open is evicted now.
    pub fn end_names(&mut self, channel: &str) {
        self.names_pending.remove(channel);
        self.evict_if_empty(channel);
    }

    // === Topic and WHOIS ===

    pub fn set_topic(&mut self, channel: &str, topic: Option<String>) {
        self.ensure_channel(channel).topic = topic.filter(|t| !t.is_empty());
    }

    pub fn set_topic_meta(&mut self, channel: &str, set_by: &str, set_at: Option<i64>) {
        let chan = self.ensure_channel(channel);
        chan.topic_set_by = Some(set_by.to_owned());
        chan.topic_set_at = set_at;
    }

    /// WHOIS record for a nick, creating the user if needed.
    pub fn whois_mut(&mut self, nick: &str) -> &mut Whois {
        &mut self.ensure_user(nick).whois
    }

    /// Drop everything, including queued ready tasks.
    pub fn reset(&mut self) {
        let dropped = self.gate.reset();
        if dropped > 0 {
            debug!(dropped, "Discarded queued ready tasks");
        }
        self.users.clear();
        self.channels.clear();
        self.joined.clear();
        self.names_pending.clear();
        self.modes = ModeSpec::default();
        self.nick = None;
    }

    fn evict_if_empty(&mut self, channel: &str) {
        if self
            .channels
            .get(channel)
            .is_some_and(|chan| chan.is_empty() && !self.names_pending.contains(channel))
        {
            self.channels.remove(channel);
            self.joined.remove(channel);
            debug!(channel = %channel, "Evicted empty channel");
        }
    }
}
