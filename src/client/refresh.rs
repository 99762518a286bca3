//! WHOIS refresh policy.
//!
//! After welcome, nick changes, joins and mode changes the engine may ask
//! the server for a fresh WHOIS to keep realnames current. A nick queried
//! within `min_interval` is skipped. Entries older than the interval are
//! pruned, and departed nicks are dropped, so the map only holds nicks
//! that are still suppressed.

use crate::config::WhoisConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct WhoisRefresh {
    enabled: bool,
    min_interval: Duration,
    last_query: HashMap<String, Instant>,
}

impl WhoisRefresh {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            enabled: true,
            min_interval,
            last_query: HashMap::new(),
        }
    }

    /// Policy that never queries.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(Duration::ZERO)
        }
    }

    pub fn from_config(config: &WhoisConfig) -> Self {
        if config.refresh {
            Self::new(Duration::from_secs(config.min_interval_secs))
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether to query `nick` now. Records the query when it says yes.
    pub fn should_query(&mut self, nick: &str) -> bool {
        if !self.enabled || nick.is_empty() {
            return false;
        }
        let now = Instant::now();
        if self
            .last_query
            .get(nick)
            .is_some_and(|at| now.duration_since(*at) < self.min_interval)
        {
            return false;
        }
        let min_interval = self.min_interval;
        self.last_query
            .retain(|_, at| now.duration_since(*at) < min_interval);
        if !min_interval.is_zero() {
            self.last_query.insert(nick.to_owned(), now);
        }
        true
    }

    /// Drop the record for a nick that has gone away.
    pub fn forget(&mut self, nick: &str) {
        self.last_query.remove(nick);
    }

    /// Number of nicks currently suppressed.
    pub fn tracked(&self) -> usize {
        self.last_query.len()
    }

    /// Forget every recorded query.
    pub fn clear(&mut self) {
        self.last_query.clear();
    }
}

impl Default for WhoisRefresh {
    fn default() -> Self {
        Self::disabled()
    }
}
