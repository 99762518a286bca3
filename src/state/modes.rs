//! Channel mode argument rules for the connected server.
//!
//! Starts from a common default and is replaced piecewise by the `PREFIX`
//! and `CHANMODES` tokens of RPL_ISUPPORT.

use slirc_proto::{ChanModes, Isupport, PrefixSpec};

const DEFAULT_PREFIX_MODES: &str = "qaohv";
const DEFAULT_PREFIX_SYMBOLS: &str = "~&@%+";
const DEFAULT_CHANMODES: [&str; 4] = ["beI", "k", "l", "imnpst"];

/// Which channel mode letters take an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSpec {
    prefix_modes: String,
    prefix_symbols: String,
    /// CHANMODES groups A to D.
    groups: [String; 4],
}

impl Default for ModeSpec {
    fn default() -> Self {
        Self {
            prefix_modes: DEFAULT_PREFIX_MODES.to_owned(),
            prefix_symbols: DEFAULT_PREFIX_SYMBOLS.to_owned(),
            groups: DEFAULT_CHANMODES.map(str::to_owned),
        }
    }
}

impl ModeSpec {
    /// Adopt whatever `PREFIX` and `CHANMODES` the reply carries.
    ///
    /// Returns `true` if anything changed.
    pub fn apply_isupport(&mut self, isupport: &Isupport<'_>) -> bool {
        let mut changed = false;
        if let Some(prefix) = isupport.prefix() {
            changed |= self.set_prefix(prefix);
        }
        if let Some(modes) = isupport.chanmodes() {
            changed |= self.set_chanmodes(modes);
        }
        changed
    }

    fn set_prefix(&mut self, prefix: PrefixSpec<'_>) -> bool {
        if self.prefix_modes == prefix.modes && self.prefix_symbols == prefix.prefixes {
            return false;
        }
        self.prefix_modes = prefix.modes.to_owned();
        self.prefix_symbols = prefix.prefixes.to_owned();
        true
    }

    fn set_chanmodes(&mut self, modes: ChanModes<'_>) -> bool {
        let groups = [modes.a, modes.b, modes.c, modes.d].map(str::to_owned);
        if self.groups == groups {
            return false;
        }
        self.groups = groups;
        true
    }

    pub fn prefix_modes(&self) -> &str {
        &self.prefix_modes
    }

    pub fn prefix_symbols(&self) -> &str {
        &self.prefix_symbols
    }

    /// Whether `mode` is a member privilege such as `o` or `v`.
    pub fn is_prefix_mode(&self, mode: char) -> bool {
        self.prefix_modes.contains(mode)
    }

    /// Whether `mode` consumes an argument when set (`adding`) or unset.
    ///
    /// Unknown letters take none.
    pub fn takes_arg(&self, mode: char, adding: bool) -> bool {
        let [a, b, c, _] = &self.groups;
        self.is_prefix_mode(mode)
            || a.contains(mode)
            || b.contains(mode)
            || (adding && c.contains(mode))
    }
}
