//! Helper functions for event handlers.
//!
//! Builders for the derived display lines handlers push to the sink.

use slirc_proto::Line;

/// Prefix carried by lines the engine synthesises for server events.
pub const SERVER_PREFIX: &str = "server";

/// Derived line attributed to the server.
pub fn server_line(command: &str, text: impl Into<String>, params: Vec<String>) -> Line {
    Line::derive(command, text, params, Some(SERVER_PREFIX.to_owned()))
}

/// Derived line attributed to a user event (`nick!event@server`).
pub fn user_line(
    command: &str,
    nick: &str,
    event: &str,
    text: impl Into<String>,
    params: Vec<String>,
) -> Line {
    Line::derive(
        command,
        text,
        params,
        Some(format!("{nick}!{event}@{SERVER_PREFIX}")),
    )
}
