//! Mock IRC server.
//!
//! Listens on an ephemeral local port and hands each accepted connection
//! back as a [`Peer`] the test scripts line by line.

use futures_util::stream::BoxStream;
use futures_util::{Sink, SinkExt, StreamExt};
use slirc_proto::{Line, LineCodec};
use std::pin::Pin;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::codec::Framed;

type PeerSink = Pin<Box<dyn Sink<String, Error = anyhow::Error> + Send>>;

/// A mock server listening on 127.0.0.1.
pub struct TestServer {
    listener: TcpListener,
}

impl TestServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|a| a.port())
            .expect("listener has an address")
    }

    /// Accept one plain TCP client.
    pub async fn accept(&self) -> anyhow::Result<Peer> {
        let (stream, _) = timeout(Duration::from_secs(5), self.listener.accept()).await??;
        let (sink, stream) = Framed::new(stream, LineCodec::new()).split::<String>();
        Ok(Peer {
            reader: stream.filter_map(|r| async move { r.ok() }).boxed(),
            writer: Box::pin(sink.sink_map_err(anyhow::Error::from)),
        })
    }

    /// Accept one WebSocket client; each text frame carries one line.
    pub async fn accept_websocket(&self) -> anyhow::Result<Peer> {
        let (stream, _) = timeout(Duration::from_secs(5), self.listener.accept()).await??;
        let ws = tokio_tungstenite::accept_async(stream).await?;
        let (sink, stream) = ws.split();
        let reader = stream
            .filter_map(|msg| async move {
                match msg {
                    Ok(Message::Text(text)) => Some(text),
                    _ => None,
                }
            })
            .boxed();
        let writer = sink
            .sink_map_err(anyhow::Error::from)
            .with(|line: String| async move { Ok::<_, anyhow::Error>(Message::Text(line)) });
        Ok(Peer {
            reader,
            writer: Box::pin(writer),
        })
    }
}

/// The server side of one client connection.
pub struct Peer {
    reader: BoxStream<'static, String>,
    writer: PeerSink,
}

impl Peer {
    /// Send a raw line to the client.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.send(line.to_owned()).await
    }

    /// Send several lines in order.
    pub async fn send_all(&mut self, lines: &[&str]) -> anyhow::Result<()> {
        for line in lines {
            self.send_raw(line).await?;
        }
        Ok(())
    }

    /// Receive a single line from the client.
    pub async fn recv(&mut self) -> anyhow::Result<Line> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Line> {
        match timeout(dur, self.reader.next()).await? {
            Some(raw) => Ok(Line::parse(&raw)),
            None => anyhow::bail!("client closed the connection"),
        }
    }

    /// Receive lines until one satisfies `predicate`, returning all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Line>>
    where
        F: FnMut(&Line) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Consume the registration burst (optional PASS, NICK, USER).
    pub async fn expect_registration(&mut self) -> anyhow::Result<Vec<Line>> {
        self.recv_until(|l| l.command == "USER").await
    }

    /// Assert nothing arrives for a short while.
    pub async fn expect_silence(&mut self) -> anyhow::Result<()> {
        match self.recv_timeout(Duration::from_millis(200)).await {
            Ok(line) => anyhow::bail!("unexpected line: {}", line.raw),
            Err(_) => Ok(()),
        }
    }

    /// Complete the server greeting for `nick` (001 through 376).
    pub async fn greet(&mut self, nick: &str) -> anyhow::Result<()> {
        self.send_all(&[
            &format!(":irc.test 001 {nick} :Welcome to the test network {nick}"),
            &format!(":irc.test 375 {nick} :- irc.test Message of the day -"),
            &format!(":irc.test 372 {nick} :- hello"),
            &format!(":irc.test 376 {nick} :End of /MOTD command."),
        ])
        .await
    }
}
