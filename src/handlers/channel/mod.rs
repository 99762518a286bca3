//! Channel event handlers.
//!
//! Handles JOIN, PART, KICK, TOPIC and the topic and NAMES numerics.

mod join;
mod kick;
mod names;
mod part;
mod topic;

pub use join::JoinHandler;
pub use kick::KickHandler;
pub use names::{EndOfNamesHandler, NamesReplyHandler};
pub use part::PartHandler;
pub use topic::{NoTopicHandler, TopicHandler, TopicReplyHandler, TopicWhoTimeHandler};
