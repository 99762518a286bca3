//! Integration tests for the WebSocket transport.

mod common;

use common::{TestServer, shared_sink, test_config};
use slirc_client::{IrcClient, NoopHooks, Target};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_websocket_registration_and_autojoin() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "websocket", "wsuser", &["#web"]);
    let sink = shared_sink();

    let (client, peer) = tokio::join!(
        IrcClient::connect(&config, Box::new(NoopHooks), Box::new(Arc::clone(&sink))),
        server.accept_websocket()
    );
    let client = client.expect("websocket connect");
    let mut peer = peer.expect("websocket accept");

    let burst = peer.expect_registration().await.expect("registration");
    assert_eq!(burst[0].raw, "NICK wsuser");

    peer.greet("wsuser").await.expect("greet");
    assert_eq!(peer.recv().await.expect("autojoin").raw, "JOIN #web");

    peer.send_raw("PING :keepalive").await.expect("send");
    assert_eq!(peer.recv().await.expect("pong").raw, "PONG keepalive");

    peer.send_raw(":friend!f@host PRIVMSG wsuser :over websocket")
        .await
        .expect("send");
    let routed = common::eventually(|| {
        !sink
            .lock()
            .lines_for(&Target::Private("friend".into()))
            .is_empty()
    })
    .await;
    assert!(routed, "private message should route to the sender's view");
    assert!(client.engine().lock().session().user("friend").is_some());
}

#[tokio::test]
async fn test_websocket_close_ends_session() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "websocket", "wsuser", &[]);

    let (client, peer) = tokio::join!(
        IrcClient::connect(&config, Box::new(NoopHooks), Box::new(shared_sink())),
        server.accept_websocket()
    );
    let client = client.expect("websocket connect");
    let mut peer = peer.expect("websocket accept");
    peer.expect_registration().await.expect("registration");

    drop(peer);
    tokio::time::timeout(Duration::from_secs(5), client.closed())
        .await
        .expect("close should propagate");
    assert!(!client.is_connected());
}

#[tokio::test]
async fn test_websocket_rejects_non_ws_url() {
    let err = slirc_client::network::Transport::websocket("http://127.0.0.1:1/")
        .await
        .err()
        .expect("http scheme must be rejected");
    assert_eq!(err.error_code(), "invalid_url");
}
