//! Numeric replies a client engine reacts to.
//!
//! Only the numerics the session model consumes or routes specially are
//! listed; any other three-digit command is still a valid [`Line`] and is
//! simply not named here.
//!
//! # Reference
//! - RFC 2812 Section 5: Replies
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>
//!
//! [`Line`]: crate::Line

#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;

/// IRC numeric reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Connection Registration ===
    /// 001 - Welcome; first param is our nick
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info
    RPL_MYINFO = 4,
    /// 005 - ISUPPORT tokens
    RPL_ISUPPORT = 5,

    // === Command Replies ===
    /// 221 - Our user modes
    RPL_UMODEIS = 221,
    /// 301 - Away message of a WHOIS target
    RPL_AWAY = 301,
    /// 311 - WHOIS user, host and realname
    RPL_WHOISUSER = 311,
    /// 312 - WHOIS server and server info
    RPL_WHOISSERVER = 312,
    /// 313 - WHOIS target is an operator
    RPL_WHOISOPERATOR = 313,
    /// 317 - WHOIS idle seconds and signon time
    RPL_WHOISIDLE = 317,
    /// 318 - End of WHOIS
    RPL_ENDOFWHOIS = 318,
    /// 319 - WHOIS channel list
    RPL_WHOISCHANNELS = 319,
    /// 330 - WHOIS account name
    RPL_WHOISACCOUNT = 330,
    /// 331 - Channel has no topic
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 333 - Topic setter and time
    RPL_TOPICWHOTIME = 333,
    /// 353 - NAMES list
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES
    RPL_ENDOFNAMES = 366,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,

    // === Errors ===
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 422 - MOTD file is missing
    ERR_NOMOTD = 422,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
    /// 442 - You're not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 482 - You're not channel operator
    ERR_CHANOPRIVSNEEDED = 482,
}

impl Response {
    /// Numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Look up a known numeric.
    pub fn from_code(code: u16) -> Option<Response> {
        use Response::*;
        Some(match code {
            1 => RPL_WELCOME,
            2 => RPL_YOURHOST,
            3 => RPL_CREATED,
            4 => RPL_MYINFO,
            5 => RPL_ISUPPORT,
            221 => RPL_UMODEIS,
            301 => RPL_AWAY,
            311 => RPL_WHOISUSER,
            312 => RPL_WHOISSERVER,
            313 => RPL_WHOISOPERATOR,
            317 => RPL_WHOISIDLE,
            318 => RPL_ENDOFWHOIS,
            319 => RPL_WHOISCHANNELS,
            330 => RPL_WHOISACCOUNT,
            331 => RPL_NOTOPIC,
            332 => RPL_TOPIC,
            333 => RPL_TOPICWHOTIME,
            353 => RPL_NAMREPLY,
            366 => RPL_ENDOFNAMES,
            372 => RPL_MOTD,
            375 => RPL_MOTDSTART,
            376 => RPL_ENDOFMOTD,
            401 => ERR_NOSUCHNICK,
            403 => ERR_NOSUCHCHANNEL,
            422 => ERR_NOMOTD,
            433 => ERR_NICKNAMEINUSE,
            442 => ERR_NOTONCHANNEL,
            482 => ERR_CHANOPRIVSNEEDED,
            _ => return None,
        })
    }

    /// The three-digit wire token, as used for handler registration.
    pub fn as_command(&self) -> String {
        format!("{:03}", self.code())
    }

    /// Error replies (4xx and 5xx).
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }

    /// Replies belonging to a WHOIS query.
    pub fn is_whois(&self) -> bool {
        matches!(
            self,
            Response::RPL_AWAY
                | Response::RPL_WHOISUSER
                | Response::RPL_WHOISSERVER
                | Response::RPL_WHOISOPERATOR
                | Response::RPL_WHOISIDLE
                | Response::RPL_ENDOFWHOIS
                | Response::RPL_WHOISCHANNELS
                | Response::RPL_WHOISACCOUNT
        )
    }

    /// Whether this numeric ends the server greeting.
    #[inline]
    pub fn ends_greeting(&self) -> bool {
        matches!(self, Response::RPL_ENDOFMOTD | Response::ERR_NOMOTD)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

/// Error returned when a token is not a known numeric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseResponseError(String);

impl fmt::Display for ParseResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown numeric reply: {}", self.0)
    }
}

impl std::error::Error for ParseResponseError {}

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .ok()
            .and_then(Response::from_code)
            .ok_or_else(|| ParseResponseError(s.to_owned()))
    }
}
