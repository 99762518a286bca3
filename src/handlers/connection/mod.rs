//! Connection lifecycle handlers.
//!
//! PING keepalive, the welcome and ISUPPORT numerics, and the MOTD
//! greeting that gates readiness.

mod isupport;
mod motd;
mod ping;
mod welcome;

pub use isupport::IsupportHandler;
pub use motd::{EndOfMotdHandler, MotdHandler};
pub use ping::PingHandler;
pub use welcome::WelcomeHandler;
