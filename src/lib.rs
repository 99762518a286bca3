//! slirc-client - Straylight IRC Client
//!
//! Client-side IRC protocol engine: decodes server lines, keeps a
//! session model of users and channels in sync, and encodes outbound
//! commands. Delivery of commands queued before the server greeting is
//! deferred until the greeting completes.
//!
//! The [`Engine`] is transport-free and can be fed lines directly;
//! [`IrcClient`] wires it to a TCP or WebSocket connection.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod input;
pub mod network;
pub mod state;
pub mod telemetry;

pub use client::{Commands, Engine, Outbox, ReadinessGate, ReadyTask, WhoisRefresh};
pub use config::Config;
pub use error::{ClientError, HandlerResult};
pub use handlers::{Handler, Registry, handler_fn};
pub use hooks::{BufferSink, Hooks, LineKind, LineSink, NoopHooks, NullSink, Target, View};
pub use network::IrcClient;
pub use state::{Channel, ModeSpec, Session, User, Whois};

pub use slirc_proto::{Line, Prefix};
