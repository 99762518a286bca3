//! Wire transports.
//!
//! Both transports are reduced to the same shape: a stream of inbound text
//! lines and a sink of outbound lines. TCP is framed with the protocol
//! crate's [`LineCodec`]; WebSocket carries one line per text message.

use crate::config::{ServerConfig, TransportKind};
use crate::error::ClientError;
use futures_util::stream::{self, BoxStream};
use futures_util::{Sink, SinkExt, StreamExt};
use slirc_proto::{LineCodec, sanitize};
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::codec::Framed;
use tracing::debug;

/// Inbound lines, without line terminators.
pub type WireStream = BoxStream<'static, Result<String, ClientError>>;

/// Outbound lines, without line terminators.
pub type WireSink = Pin<Box<dyn Sink<String, Error = ClientError> + Send>>;

/// An open connection split into its two directions.
pub struct Transport {
    pub reader: WireStream,
    pub writer: WireSink,
}

impl Transport {
    /// Open the transport configured for `server`.
    pub async fn connect(server: &ServerConfig) -> Result<Self, ClientError> {
        match server.transport {
            TransportKind::Tcp => Self::tcp(&server.address()).await,
            TransportKind::Websocket => Self::websocket(&server.websocket_url()).await,
        }
    }

    /// Newline-framed TCP.
    pub async fn tcp(addr: &str) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        debug!(addr = %addr, "TCP connected");
        Ok(Self::framed(stream))
    }

    /// Newline framing over any byte stream.
    pub fn framed<T>(io: T) -> Self
    where
        T: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (sink, stream) = Framed::new(io, LineCodec::new()).split::<String>();
        Self {
            reader: stream.map(|item| item.map_err(ClientError::from)).boxed(),
            writer: Box::pin(sink.sink_map_err(ClientError::from)),
        }
    }

    /// WebSocket, one protocol line per text message.
    pub async fn websocket(url: &str) -> Result<Self, ClientError> {
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(ClientError::InvalidUrl(url.to_owned()));
        }
        let (ws, response) = tokio_tungstenite::connect_async(url).await?;
        debug!(url = %url, status = %response.status(), "WebSocket connected");

        let (sink, stream) = ws.split();
        let reader = stream
            .map(|message| match message {
                Ok(Message::Text(text)) => split_lines(&text),
                Ok(Message::Binary(data)) => split_lines(&String::from_utf8_lossy(&data)),
                // Ping/pong are answered by tungstenite; close ends the stream.
                Ok(_) => Vec::new(),
                Err(e) => vec![Err(ClientError::from(e))],
            })
            .flat_map(stream::iter)
            .boxed();
        let writer = sink.with(|line: String| async move {
            Ok::<_, ClientError>(Message::Text(sanitize(&line).to_owned()))
        });

        Ok(Self {
            reader,
            writer: Box::pin(writer),
        })
    }
}

/// Split a message body into lines. Servers normally send exactly one,
/// but some batch several CRLF-terminated lines into a frame.
fn split_lines(text: &str) -> Vec<Result<String, ClientError>> {
    text.split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .map(|line| Ok(line.to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn test_split_lines() {
        let lines: Vec<String> = split_lines("PING a\r\nPING b\r\n")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["PING a", "PING b"]);
        assert!(split_lines("").is_empty());
    }

    #[tokio::test]
    async fn test_framed_round_trip() {
        let (client, mut server) = tokio::io::duplex(1024);
        let Transport {
            mut reader,
            mut writer,
        } = Transport::framed(client);

        writer.send("NICK me".to_owned()).await.unwrap();
        let mut buf = [0u8; 9];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"NICK me\r\n");

        server.write_all(b"PING :x\r\n\r\n:a PRIVMSG").await.unwrap();
        drop(server);
        assert_eq!(reader.next().await.unwrap().unwrap(), "PING :x");
        assert_eq!(reader.next().await.unwrap().unwrap(), ":a PRIVMSG");
        assert!(reader.next().await.is_none());
    }

    #[tokio::test]
    async fn test_websocket_rejects_bad_scheme() {
        let result = Transport::websocket("http://localhost/").await;
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
