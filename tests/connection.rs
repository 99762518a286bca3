//! Integration tests for the connection lifecycle over TCP.
//!
//! Registration, the readiness gate, keepalive, hooks issuing commands
//! and teardown, all against the scripted mock server.

mod common;

use common::{Peer, TestServer, eventually, shared_sink, test_config};
use parking_lot::Mutex;
use slirc_client::{ClientError, Commands, Config, Hooks, IrcClient, NoopHooks, Target};
use std::sync::Arc;
use std::time::Duration;

async fn connect(server: &TestServer, config: &Config, hooks: Box<dyn Hooks>) -> (IrcClient, Peer) {
    let (client, peer) = tokio::join!(
        IrcClient::connect(config, hooks, Box::new(shared_sink())),
        server.accept()
    );
    (
        client.expect("client should connect"),
        peer.expect("server should accept"),
    )
}

fn raws(lines: &[slirc_client::Line]) -> Vec<&str> {
    lines.iter().map(|l| l.raw.as_str()).collect()
}

#[tokio::test]
async fn test_registration_burst() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &[]);
    let (_client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;

    let burst = peer.expect_registration().await.expect("registration");
    assert_eq!(raws(&burst), vec!["NICK tester", "USER tester 0 * :Test Client"]);
}

#[tokio::test]
async fn test_registration_sends_pass_first() {
    let server = TestServer::bind().await.expect("bind");
    let mut config = test_config(server.port(), "tcp", "tester", &[]);
    config.identity.password = Some("hunter2".into());
    let (_client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;

    let burst = peer.expect_registration().await.expect("registration");
    assert_eq!(
        raws(&burst),
        vec!["PASS hunter2", "NICK tester", "USER tester 0 * :Test Client"]
    );
}

#[tokio::test]
async fn test_autojoin_waits_for_end_of_motd() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &["#rust", "#tokio"]);
    let (client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    // Welcome alone does not open the gate.
    peer.send_raw(":irc.test 001 tester :Welcome tester")
        .await
        .expect("send");
    peer.expect_silence().await.expect("no JOIN before 376");
    assert!(!client.engine().lock().session().is_ready());

    peer.send_raw(":irc.test 376 tester :End of /MOTD command.")
        .await
        .expect("send");
    let joins = peer
        .recv_until(|l| l.raw == "JOIN #tokio")
        .await
        .expect("autojoin");
    assert_eq!(raws(&joins), vec!["JOIN #rust", "JOIN #tokio"]);
    assert!(client.engine().lock().session().is_ready());
}

#[tokio::test]
async fn test_no_motd_also_opens_gate() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &["#rust"]);
    let (_client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    peer.send_all(&[
        ":irc.test 001 tester :Welcome",
        ":irc.test 422 tester :MOTD File is missing",
    ])
    .await
    .expect("send");
    let join = peer.recv().await.expect("autojoin");
    assert_eq!(join.raw, "JOIN #rust");
}

#[tokio::test]
async fn test_ready_task_runs_once_after_greeting() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &[]);
    let (client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    client
        .on_ready(|c| c.msg("NickServ", "IDENTIFY secret"))
        .expect("queue");
    peer.expect_silence().await.expect("queued, not sent");

    peer.greet("tester").await.expect("greet");
    let line = peer.recv().await.expect("released task");
    assert_eq!(line.raw, "PRIVMSG NickServ :IDENTIFY secret");

    // A second 376 must not replay it.
    peer.send_raw(":irc.test 376 tester :End of /MOTD command.")
        .await
        .expect("send");
    peer.expect_silence().await.expect("no replay");

    // Once ready, tasks run immediately.
    client.on_ready(|c| c.join("#late", None)).expect("run now");
    assert_eq!(peer.recv().await.expect("join").raw, "JOIN #late");
}

#[tokio::test]
async fn test_ping_answered_with_pong() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &[]);
    let (_client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    peer.send_raw("PING :irc.test").await.expect("send");
    assert_eq!(peer.recv().await.expect("pong").raw, "PONG irc.test");

    // Keepalive works before registration completes too.
    peer.send_raw("PING :token with space").await.expect("send");
    assert_eq!(
        peer.recv().await.expect("pong").raw,
        "PONG :token with space"
    );
}

/// Greets NickServ from inside the ready hook.
struct Identify {
    welcomed: Option<String>,
}

impl Hooks for Identify {
    fn on_welcome(&mut self, _commands: &Commands, nick: &str) {
        self.welcomed = Some(nick.to_owned());
    }

    fn on_ready(&mut self, commands: &Commands) {
        commands
            .msg("NickServ", "IDENTIFY pw")
            .expect("connected while ready");
    }
}

#[tokio::test]
async fn test_hooks_can_send_without_reentering_engine() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &[]);
    let hooks = Arc::new(Mutex::new(Identify { welcomed: None }));
    let (_client, mut peer) = connect(&server, &config, Box::new(Arc::clone(&hooks))).await;
    peer.expect_registration().await.expect("registration");

    peer.greet("tester").await.expect("greet");
    let line = peer.recv().await.expect("hook output");
    assert_eq!(line.raw, "PRIVMSG NickServ :IDENTIFY pw");
    assert_eq!(hooks.lock().welcomed.as_deref(), Some("tester"));
}

#[tokio::test]
async fn test_whois_refresh_after_welcome() {
    let server = TestServer::bind().await.expect("bind");
    let mut config = test_config(server.port(), "tcp", "tester", &[]);
    config.whois.refresh = true;
    let (_client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    peer.send_raw(":irc.test 001 tester :Welcome")
        .await
        .expect("send");
    assert_eq!(peer.recv().await.expect("whois").raw, "WHOIS tester");

    // Our own JOIN right after is inside the interval.
    peer.send_raw(":tester!t@host JOIN #rust").await.expect("send");
    peer.expect_silence().await.expect("no repeat WHOIS");
}

#[tokio::test]
async fn test_session_tracks_server_lines() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &[]);
    let sink = shared_sink();
    let (client, peer) = tokio::join!(
        IrcClient::connect(&config, Box::new(NoopHooks), Box::new(Arc::clone(&sink))),
        server.accept()
    );
    let client = client.expect("connect");
    let mut peer = peer.expect("accept");
    peer.expect_registration().await.expect("registration");

    peer.send_all(&[
        ":irc.test 001 tester :Welcome",
        ":tester!t@host JOIN #rust",
        ":irc.test 353 tester = #rust :tester @alice +bob",
        ":irc.test 366 tester #rust :End of /NAMES list.",
        ":alice!a@host PRIVMSG #rust :hello",
    ])
    .await
    .expect("send");

    let tracked = eventually(|| {
        let engine = client.engine().lock();
        engine
            .session()
            .format_user_list("#rust")
            .is_some_and(|list| list == "@alice, +bob, tester")
    })
    .await;
    assert!(tracked, "NAMES should populate #rust");
    assert!(eventually(|| sink.lock().entries().len() >= 5).await);

    let sink = sink.lock();
    let channel = sink.lines_for(&Target::Channel("#rust".into()));
    assert_eq!(
        channel,
        vec![
            "End of user list for #rust",
            ":alice!a@host PRIVMSG #rust :hello"
        ]
    );
    assert_eq!(sink.pushed(), vec!["End of user list for #rust"]);
}

#[tokio::test]
async fn test_server_close_resets_session() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &[]);
    let (client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    peer.greet("tester").await.expect("greet");
    peer.send_raw(":tester!t@host JOIN #rust").await.expect("send");
    assert!(
        eventually(|| client.engine().lock().session().has_joined("#rust")).await
    );

    drop(peer);
    tokio::time::timeout(Duration::from_secs(5), client.closed())
        .await
        .expect("client should notice the close");

    assert!(!client.is_connected());
    let engine = client.engine().lock();
    assert!(engine.session().channel("#rust").is_none());
    assert!(!engine.session().is_ready());
    assert!(engine.session().nick().is_none());
    drop(engine);

    let err = client.commands().msg("#rust", "anyone?").unwrap_err();
    assert!(matches!(err, ClientError::NotConnected));
}

#[tokio::test]
async fn test_quit_flushes_then_refuses_commands() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &[]);
    let (client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    client.quit(Some("gone fishing")).expect("quit");
    assert_eq!(peer.recv().await.expect("quit").raw, "QUIT :gone fishing");

    assert!(matches!(
        client.commands().nick("other"),
        Err(ClientError::NotConnected)
    ));
    // The writer closes its half once the outbox is gone.
    assert!(peer.recv().await.is_err());
}

#[tokio::test]
async fn test_disconnect_drops_queued_ready_tasks() {
    let server = TestServer::bind().await.expect("bind");
    let config = test_config(server.port(), "tcp", "tester", &["#never"]);
    let (mut client, mut peer) = connect(&server, &config, Box::new(NoopHooks)).await;
    peer.expect_registration().await.expect("registration");

    client.disconnect();
    assert!(!client.is_connected());
    assert!(peer.recv().await.is_err(), "nothing after teardown");
    client.join().await;
}
