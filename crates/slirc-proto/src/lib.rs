//! # slirc-proto
//!
//! Protocol primitives for the Straylight IRC client engine.
//!
//! ## Features
//!
//! - Lenient line decoding: [`Line::parse`] never fails, malformed input
//!   degrades to empty fields instead of being dropped
//! - IRCv3 message tag parsing with value unescaping
//! - Outgoing [`Command`] rendering in `COMMAND p1 p2 :trailing` wire form
//! - CTCP envelopes (`\x01ACTION waves\x01`)
//! - RPL_ISUPPORT `PREFIX` and `CHANMODES` parsing via [`Isupport`]
//! - Numeric [`Response`] catalogue for the replies a client engine consumes
//! - Optional Tokio [`LineCodec`] for newline-framed byte streams
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_proto::{Command, Line};
//!
//! let line = Line::parse(":nick!u@h PRIVMSG #room :hello there friend");
//! assert_eq!(line.prefix.as_deref(), Some("nick!u@h"));
//! assert_eq!(line.command, "PRIVMSG");
//! assert_eq!(line.params, vec!["#room", "hello there friend"]);
//!
//! let out = Command::PRIVMSG("#room".into(), "hi all".into());
//! assert_eq!(out.to_string(), "PRIVMSG #room :hi all");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
#[cfg(feature = "tokio")]
pub mod codec;
pub mod command;
pub mod ctcp;
pub mod error;
pub mod isupport;
pub mod line;
pub mod prefix;
pub mod response;
pub mod tags;

pub use self::chan::ChannelExt;
#[cfg(feature = "tokio")]
pub use self::codec::{LineCodec, MAX_LINE_LEN};
pub use self::command::{sanitize, Command};
pub use self::ctcp::{Ctcp, CtcpKind};
pub use self::error::ProtocolError;
pub use self::isupport::{ChanModes, Isupport, PrefixSpec};
pub use self::line::Line;
pub use self::prefix::Prefix;
pub use self::response::Response;
pub use self::tags::{parse_tags, unescape_tag_value};
