//! Unified error handling for slirc-client.
//!
//! This module provides the error hierarchy for the client engine, with
//! automatic conversions and static codes for log labeling.

use slirc_proto::ProtocolError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

// ============================================================================
// Client Errors (engine, encoder, transport)
// ============================================================================

/// Errors surfaced by the engine, the command encoder and the transport.
#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)] // WebSocket variant is large but rarely constructed
pub enum ClientError {
    /// A send was attempted while no connection is open.
    #[error("not connected")]
    NotConnected,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    /// A chat command was missing a required argument.
    #[error("not enough parameters for /{0}")]
    NeedMoreParams(&'static str),

    #[error("unknown command: /{0}")]
    UnknownCommand(String),

    /// Text or a channel command was typed with no channel or query open.
    #[error("no channel or query selected")]
    NoTarget,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConnected => "not_connected",
            Self::Io(_) => "io_error",
            Self::Protocol(_) => "protocol_error",
            Self::WebSocket(_) => "websocket_error",
            Self::InvalidUrl(_) => "invalid_url",
            Self::NeedMoreParams(_) => "need_more_params",
            Self::UnknownCommand(_) => "unknown_command",
            Self::NoTarget => "no_target",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the error means the connection is gone.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::NotConnected | Self::Io(_) | Self::WebSocket(_))
    }
}

/// Result type for event handlers.
pub type HandlerResult = Result<(), ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClientError::NotConnected.error_code(), "not_connected");
        assert_eq!(ClientError::NeedMoreParams("join").error_code(), "need_more_params");
        assert_eq!(
            ClientError::UnknownCommand("frob".into()).error_code(),
            "unknown_command"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ClientError::NotConnected.to_string(), "not connected");
        assert_eq!(
            ClientError::NeedMoreParams("join").to_string(),
            "not enough parameters for /join"
        );
    }

    #[test]
    fn test_protocol_conversion() {
        let err: ClientError = ProtocolError::EmptyLine.into();
        assert_eq!(err.error_code(), "protocol_error");
        assert!(!err.is_disconnect());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert!(ClientError::from(io).is_disconnect());
    }
}
