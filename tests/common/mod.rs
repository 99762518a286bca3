//! Integration test common infrastructure.
//!
//! Provides a scripted mock IRC server (TCP or WebSocket) that the client
//! under test connects to, plus config and sink helpers.

pub mod server;

#[allow(unused_imports)]
pub use server::{Peer, TestServer};

use parking_lot::Mutex;
use slirc_client::{BufferSink, Config};
use std::sync::Arc;
use std::time::Duration;

/// Config pointing at a local mock server, WHOIS refresh off.
#[allow(dead_code)]
pub fn test_config(port: u16, transport: &str, nick: &str, autojoin: &[&str]) -> Config {
    let autojoin = autojoin
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!(
        r#"
autojoin = [{autojoin}]

[server]
host = "127.0.0.1"
port = {port}
transport = "{transport}"

[identity]
nick = "{nick}"
realname = "Test Client"

[whois]
refresh = false
"#
    );
    toml::from_str(&text).expect("test config should parse")
}

/// Sink the test keeps a handle to.
#[allow(dead_code)]
pub fn shared_sink() -> Arc<Mutex<BufferSink>> {
    Arc::new(Mutex::new(BufferSink::new()))
}

/// Poll `check` until it holds or a second passes.
#[allow(dead_code)]
pub async fn eventually<F: FnMut() -> bool>(mut check: F) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
