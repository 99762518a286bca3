//! Client engine: dispatch loop, command encoder and readiness gate.

pub mod commands;
pub mod engine;
pub mod outbox;
pub mod readiness;
pub mod refresh;

pub use commands::Commands;
pub use engine::Engine;
pub use outbox::Outbox;
pub use readiness::{ReadinessGate, ReadyTask};
pub use refresh::WhoisRefresh;
