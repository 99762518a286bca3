//! State management module.
//!
//! Contains the Session (per-connection client state) and its entities.

mod channel;
mod modes;
mod session;
mod user;
mod whois;

pub use channel::{Channel, MemberModes, parse_member_entry};
pub use modes::ModeSpec;
pub use session::Session;
pub use user::User;
pub use whois::Whois;
