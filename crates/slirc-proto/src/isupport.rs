//! RPL_ISUPPORT (005) token parsing.
//!
//! Only the tokens a client engine needs to walk channel MODE lines are
//! given typed accessors: `PREFIX` and `CHANMODES`.

/// A single ISUPPORT token, either `KEY` or `KEY=VALUE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsupportEntry<'a> {
    /// The token key (e.g. `NETWORK`).
    pub key: &'a str,
    /// The value after `=`, if any.
    pub value: Option<&'a str>,
}

/// Tokens from one RPL_ISUPPORT reply.
///
/// ```
/// use slirc_proto::Isupport;
///
/// let params = ["me", "PREFIX=(ov)@+", "CHANMODES=b,k,l,nt", "are supported"];
/// let isupport = Isupport::from_params(&params);
/// assert_eq!(isupport.get("prefix"), Some(Some("(ov)@+")));
/// assert!(isupport.chanmodes().is_some_and(|m| m.takes_arg('l', true)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Isupport<'a> {
    entries: Vec<IsupportEntry<'a>>,
}

impl<'a> Isupport<'a> {
    /// Parse the parameters of a 005 reply.
    ///
    /// The first parameter (our nick) is skipped, as is a final
    /// human-readable parameter containing a space.
    pub fn from_params<S: AsRef<str>>(params: &'a [S]) -> Self {
        let mut tokens = params.get(1..).unwrap_or_default();
        if let Some(last) = tokens.last() {
            if last.as_ref().contains(' ') {
                tokens = &tokens[..tokens.len() - 1];
            }
        }

        let entries = tokens
            .iter()
            .map(|t| t.as_ref())
            .take_while(|t| !t.starts_with(':'))
            .filter(|t| !t.is_empty())
            .map(|t| match t.split_once('=') {
                Some((key, value)) => IsupportEntry {
                    key,
                    value: Some(value),
                },
                None => IsupportEntry {
                    key: t,
                    value: None,
                },
            })
            .collect();
        Isupport { entries }
    }

    /// Iterate over every parsed token.
    pub fn iter(&self) -> impl Iterator<Item = &IsupportEntry<'a>> {
        self.entries.iter()
    }

    /// Look a key up, case-insensitively. The last occurrence wins.
    ///
    /// `Some(None)` means the key is present without a value.
    pub fn get(&self, key: &str) -> Option<Option<&'a str>> {
        self.entries
            .iter()
            .rfind(|e| e.key.eq_ignore_ascii_case(key))
            .map(|e| e.value)
    }

    /// The `PREFIX` token.
    pub fn prefix(&self) -> Option<PrefixSpec<'a>> {
        self.get("PREFIX").flatten().and_then(PrefixSpec::parse)
    }

    /// The `CHANMODES` token.
    pub fn chanmodes(&self) -> Option<ChanModes<'a>> {
        self.get("CHANMODES").flatten().and_then(ChanModes::parse)
    }
}

/// Parsed `PREFIX` token, pairing member modes with their NAMES symbols.
///
/// ```
/// use slirc_proto::isupport::PrefixSpec;
///
/// let spec = PrefixSpec::parse("(qaohv)~&@%+").unwrap();
/// assert_eq!(spec.prefix_for_mode('o'), Some('@'));
/// assert_eq!(spec.mode_for_prefix('~'), Some('q'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixSpec<'a> {
    /// Mode letters, highest rank first.
    pub modes: &'a str,
    /// Symbols in the same order as `modes`.
    pub prefixes: &'a str,
}

impl<'a> PrefixSpec<'a> {
    /// Parse a value like `(ov)@+`. An empty `PREFIX=` parses to an
    /// empty spec.
    pub fn parse(s: &'a str) -> Option<Self> {
        if s.is_empty() {
            return Some(PrefixSpec {
                modes: "",
                prefixes: "",
            });
        }
        let rest = s.strip_prefix('(')?;
        let (modes, prefixes) = rest.split_once(')')?;
        if modes.chars().count() != prefixes.chars().count() {
            return None;
        }
        Some(PrefixSpec { modes, prefixes })
    }

    /// Whether `mode` is a member-prefix mode on this server.
    #[inline]
    pub fn is_prefix_mode(&self, mode: char) -> bool {
        self.modes.contains(mode)
    }

    /// The NAMES symbol for a member mode.
    pub fn prefix_for_mode(&self, mode: char) -> Option<char> {
        self.modes
            .chars()
            .position(|c| c == mode)
            .and_then(|i| self.prefixes.chars().nth(i))
    }

    /// The member mode for a NAMES symbol.
    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        self.prefixes
            .chars()
            .position(|c| c == prefix)
            .and_then(|i| self.modes.chars().nth(i))
    }
}

/// Parsed `CHANMODES` token.
///
/// - **A**: list modes, always take a parameter (`b`)
/// - **B**: always take a parameter (`k`)
/// - **C**: take a parameter only when set (`l`)
/// - **D**: never take a parameter (`n`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChanModes<'a> {
    /// Type A modes.
    pub a: &'a str,
    /// Type B modes.
    pub b: &'a str,
    /// Type C modes.
    pub c: &'a str,
    /// Type D modes.
    pub d: &'a str,
}

impl<'a> ChanModes<'a> {
    /// Parse a value like `beI,k,l,imnpst`. Groups past the fourth are
    /// folded into D.
    pub fn parse(s: &'a str) -> Option<Self> {
        let mut parts = s.splitn(4, ',');
        let (a, b, c, d) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        Some(ChanModes { a, b, c, d })
    }

    /// Whether `mode` consumes a parameter in the given direction.
    pub fn takes_arg(&self, mode: char, adding: bool) -> bool {
        self.a.contains(mode) || self.b.contains(mode) || (adding && self.c.contains(mode))
    }
}
