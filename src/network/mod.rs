//! Network module.
//!
//! Contains the wire transports (TCP, WebSocket) and the client connection
//! that drives the engine from them.

mod connection;
pub mod transport;

pub use connection::IrcClient;
pub use transport::{Transport, WireSink, WireStream};
