//! User event handlers.
//!
//! Handles NICK, QUIT, MODE, the user-mode reply and the WHOIS numerics.

mod mode;
mod nick;
mod quit;
mod whois;

pub use mode::{ModeHandler, UmodeHandler, mode_changes};
pub use nick::NickHandler;
pub use quit::QuitHandler;
pub use whois::WhoisHandler;
