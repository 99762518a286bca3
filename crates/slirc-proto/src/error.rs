//! Error types for the IRC protocol library.
//!
//! Line decoding is infallible by construction, so the only errors here
//! come from the byte-level framing layer.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An outgoing line was empty after sanitizing.
    #[error("refusing to send an empty line")]
    EmptyLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err: ProtocolError = io_err.into();
        assert_eq!(err.to_string(), "io error: broken pipe");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_empty_line_display() {
        assert_eq!(
            ProtocolError::EmptyLine.to_string(),
            "refusing to send an empty line"
        );
    }
}
