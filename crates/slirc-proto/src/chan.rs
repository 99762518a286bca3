//! Channel name recognition.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channel names

/// Characters that introduce a channel name.
pub const CHANNEL_PREFIXES: [char; 4] = ['#', '&', '+', '!'];

/// Extension trait for telling channel targets apart from nicknames.
pub trait ChannelExt {
    /// Whether this string names a channel.
    ///
    /// A channel name starts with one of [`CHANNEL_PREFIXES`], has at least
    /// one more character and contains no space, comma, or control character.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();
        match chars.next() {
            Some(first) if CHANNEL_PREFIXES.contains(&first) => {}
            _ => return false,
        }

        let mut rest = chars.peekable();
        if rest.peek().is_none() {
            return false;
        }
        rest.all(|c| c != ' ' && c != ',' && !c.is_control())
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
