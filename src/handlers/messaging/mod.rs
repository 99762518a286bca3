//! Message handlers (PRIVMSG and NOTICE).

mod privmsg;

pub use privmsg::PrivmsgHandler;
