//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::{Config, TransportKind};
use slirc_proto::ChannelExt;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must be non-zero")]
    InvalidPort,
    #[error("server.path must start with '/', got '{0}'")]
    InvalidWebSocketPath(String),
    #[error("identity.nick is required")]
    MissingNick,
    #[error("identity.nick is not a valid nickname: '{0}'")]
    InvalidNick(String),
    #[error("autojoin entry is not a channel name: '{0}'")]
    InvalidChannel(String),
    #[error("log.filter is not a valid filter directive: '{0}'")]
    InvalidLogFilter(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Server endpoint
    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if config.server.transport == TransportKind::Websocket && !config.server.path.starts_with('/')
    {
        errors.push(ValidationError::InvalidWebSocketPath(config.server.path.clone()));
    }

    // Identity
    let nick = &config.identity.nick;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if !is_valid_nick(nick) {
        errors.push(ValidationError::InvalidNick(nick.clone()));
    }

    // Auto-join
    for channel in &config.autojoin {
        if !channel.is_channel_name() {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if EnvFilter::try_new(&config.log.filter).is_err() {
        errors.push(ValidationError::InvalidLogFilter(config.log.filter.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Nicknames may not start with a digit, `-` or a channel prefix, and may
/// not contain spaces, commas or control characters.
fn is_valid_nick(nick: &str) -> bool {
    let Some(first) = nick.chars().next() else {
        return false;
    };
    if first.is_ascii_digit() || matches!(first, '-' | '#' | '&' | '+' | '!' | ':') {
        return false;
    }
    !nick
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, ',' | '*' | '?' | '@' | '!'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IdentityConfig, LogConfig, ServerConfig, WhoisConfig};

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "irc.example.net".into(),
                port: 6667,
                transport: TransportKind::Tcp,
                path: "/".into(),
            },
            identity: IdentityConfig {
                nick: "jesse".into(),
                username: None,
                realname: None,
                password: None,
            },
            autojoin: vec!["#rust".into()],
            whois: WhoisConfig::default(),
            log: LogConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&config()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = config();
        config.server.host = String::new();
        config.server.port = 0;
        config.identity.nick = "9lives".into();
        config.autojoin.push("rust".into());

        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingHost,
                ValidationError::InvalidPort,
                ValidationError::InvalidNick("9lives".into()),
                ValidationError::InvalidChannel("rust".into()),
            ]
        );
    }

    #[test]
    fn test_websocket_path() {
        let mut config = config();
        config.server.transport = TransportKind::Websocket;
        config.server.path = "irc".into();
        assert_eq!(
            validate(&config).unwrap_err(),
            vec![ValidationError::InvalidWebSocketPath("irc".into())]
        );
    }

    #[test]
    fn test_nick_rules() {
        assert!(is_valid_nick("jesse_g"));
        assert!(is_valid_nick("[away]"));
        assert!(!is_valid_nick("#chan"));
        assert!(!is_valid_nick("has space"));
        assert!(!is_valid_nick("a,b"));
        assert!(!is_valid_nick(""));
    }

    #[test]
    fn test_missing_nick() {
        let mut config = config();
        config.identity.nick = String::new();
        assert_eq!(validate(&config).unwrap_err(), vec![ValidationError::MissingNick]);
    }
}
