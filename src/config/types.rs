//! Core configuration types and loading.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_log_filter, default_port, default_true, default_whois_interval, default_ws_path,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server to connect to.
    pub server: ServerConfig,
    /// Who we register as.
    pub identity: IdentityConfig,
    /// Channels joined once the greeting completes.
    #[serde(default)]
    pub autojoin: Vec<String>,
    /// WHOIS refresh policy.
    #[serde(default)]
    pub whois: WhoisConfig,
    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Wire transport to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Newline-framed TCP.
    #[default]
    Tcp,
    /// One text frame per line.
    Websocket,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Tcp => f.write_str("tcp"),
            TransportKind::Websocket => f.write_str("websocket"),
        }
    }
}

/// Server endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname or IP address.
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub transport: TransportKind,
    /// Request path for WebSocket transport.
    #[serde(default = "default_ws_path")]
    pub path: String,
}

impl ServerConfig {
    /// `host:port` for TCP.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `ws://host:port/path` for WebSocket.
    pub fn websocket_url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, self.path)
    }
}

/// Registration identity.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub nick: String,
    /// Defaults to the nick.
    pub username: Option<String>,
    /// Defaults to the nick.
    pub realname: Option<String>,
    /// Connection credential sent as PASS.
    pub password: Option<String>,
}

impl IdentityConfig {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nick)
    }

    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.nick)
    }
}

/// WHOIS refresh policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WhoisConfig {
    /// Issue follow-up WHOIS queries after welcome, NICK, JOIN and MODE.
    #[serde(default = "default_true")]
    pub refresh: bool,
    /// Skip a nick queried within this many seconds.
    #[serde(default = "default_whois_interval")]
    pub min_interval_secs: u64,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            refresh: default_true(),
            min_interval_secs: default_whois_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}
