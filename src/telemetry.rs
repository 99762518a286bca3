//! Telemetry utilities: subscriber setup, dispatch timing and spans.

use crate::config::LogConfig;
use std::time::Instant;
use tracing::trace;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Returns an error if a
/// subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

/// Guard for timing one line's dispatch.
///
/// Logs the elapsed time at trace level when dropped.
pub struct DispatchTimer {
    command: String,
    start: Instant,
}

impl DispatchTimer {
    /// Start timing a dispatch.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for DispatchTimer {
    fn drop(&mut self) {
        let micros = self.start.elapsed().as_micros() as u64;
        trace!(command = %self.command, micros, "Dispatch finished");
    }
}

/// Standardized span constructors for connection observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span covering one server connection.
    pub fn connection(server: &str, transport: &str) -> Span {
        info_span!("connection", server = %server, transport = %transport)
    }

    /// Span for a chat input command typed by the user.
    pub fn input(name: &str, target: Option<&str>) -> Span {
        if let Some(target) = target {
            info_span!("input", name = %name, target = %target)
        } else {
            info_span!("input", name = %name)
        }
    }
}
