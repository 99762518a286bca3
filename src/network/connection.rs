//! IrcClient - one live connection driving one engine.
//!
//! ```text
//!   transport reader ──▶ read task ──lock──▶ Engine ──▶ hooks / sink
//!                                              │
//!                                           Commands
//!                                              ▼
//!   transport writer ◀── write task ◀── outbox (mpsc)
//! ```
//!
//! The engine sits behind one mutex that the read task enters once per
//! line, so handlers never interleave. Commands only queue into the
//! outbox, so hooks can send without re-entering the lock.

use super::transport::{Transport, WireSink, WireStream};
use crate::client::{Commands, Engine, Outbox, ReadyTask, WhoisRefresh};
use crate::config::Config;
use crate::error::{ClientError, HandlerResult};
use crate::hooks::{Hooks, LineSink};
use crate::telemetry::spans;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, trace, warn};

/// A connected IRC client.
pub struct IrcClient {
    engine: Arc<Mutex<Engine>>,
    outbox: Outbox,
    closed: watch::Receiver<bool>,
    reader: Option<JoinHandle<()>>,
    writer: Option<JoinHandle<()>>,
}

impl IrcClient {
    /// Connect to the configured server and register.
    pub async fn connect(
        config: &Config,
        hooks: Box<dyn Hooks>,
        sink: Box<dyn LineSink>,
    ) -> Result<Self, ClientError> {
        let span = spans::connection(&config.server.host, &config.server.transport.to_string());
        let transport = Transport::connect(&config.server)
            .instrument(span)
            .await?;
        info!(
            server = %config.server.host,
            port = config.server.port,
            transport = %config.server.transport,
            "Connected"
        );
        Self::start(transport, config, hooks, sink)
    }

    /// Drive an already open transport.
    ///
    /// Sends PASS (when a credential is configured), NICK and USER, and
    /// queues the auto-join channels behind the readiness gate.
    pub fn start(
        transport: Transport,
        config: &Config,
        hooks: Box<dyn Hooks>,
        sink: Box<dyn LineSink>,
    ) -> Result<Self, ClientError> {
        let (outbox, rx) = Outbox::channel();
        let commands = Commands::new(outbox.clone());
        let mut engine = Engine::new(commands.clone(), hooks, sink)
            .with_refresh(WhoisRefresh::from_config(&config.whois));

        let identity = &config.identity;
        if let Some(password) = &identity.password {
            commands.pass(password)?;
        }
        commands.nick(&identity.nick)?;
        commands.user(identity.username(), identity.realname())?;

        let autojoin: Vec<ReadyTask> = config
            .autojoin
            .iter()
            .cloned()
            .map(|channel| -> ReadyTask { Box::new(move |c: &Commands| c.join(&channel, None)) })
            .collect();
        engine.on_ready_tasks(autojoin)?;

        let engine = Arc::new(Mutex::new(engine));
        let (closed_tx, closed) = watch::channel(false);
        let Transport { reader, writer } = transport;

        let writer = tokio::spawn(write_loop(writer, rx, outbox.clone()));
        let reader = tokio::spawn(read_loop(
            reader,
            Arc::clone(&engine),
            outbox.clone(),
            closed_tx,
        ));

        Ok(Self {
            engine,
            outbox,
            closed,
            reader: Some(reader),
            writer: Some(writer),
        })
    }

    /// Shared handle to the engine. Lock it once per operation.
    pub fn engine(&self) -> &Arc<Mutex<Engine>> {
        &self.engine
    }

    /// Command encoder bound to this connection.
    pub fn commands(&self) -> Commands {
        self.engine.lock().commands().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.outbox.is_connected()
    }

    /// Run `task` once the server greeting completes.
    pub fn on_ready<F>(&self, task: F) -> HandlerResult
    where
        F: FnOnce(&Commands) -> Result<(), ClientError> + Send + 'static,
    {
        self.engine.lock().on_ready(task)
    }

    /// Resolves once the connection has been torn down.
    pub async fn closed(&self) {
        let mut closed = self.closed.clone();
        if closed.wait_for(|done| *done).await.is_err() {
            debug!("Close signal dropped");
        }
    }

    /// Send QUIT and stop accepting further commands.
    ///
    /// Lines already queued, the QUIT included, are still written.
    pub fn quit(&self, message: Option<&str>) -> Result<(), ClientError> {
        let result = self.commands().quit(message);
        self.outbox.detach();
        result
    }

    /// Tear the connection down now. Queued ready tasks are discarded and
    /// the session is reset.
    pub fn disconnect(&mut self) {
        self.outbox.detach();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.engine.lock().reset();
        info!("Disconnected");
    }

    /// Wait for both connection tasks to finish.
    pub async fn join(mut self) {
        for (name, task) in [("reader", self.reader.take()), ("writer", self.writer.take())] {
            let Some(task) = task else { continue };
            if let Err(e) = task.await
                && !e.is_cancelled()
            {
                warn!(task = name, error = %e, "Connection task failed");
            }
        }
    }
}

impl Drop for IrcClient {
    fn drop(&mut self) {
        self.outbox.detach();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

async fn read_loop(
    mut reader: WireStream,
    engine: Arc<Mutex<Engine>>,
    outbox: Outbox,
    closed: watch::Sender<bool>,
) {
    while let Some(item) = reader.next().await {
        match item {
            Ok(raw) => {
                trace!(line = %raw, "Received");
                engine.lock().handle_raw(&raw);
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Read failed");
                break;
            }
        }
    }

    info!("Connection closed");
    outbox.detach();
    engine.lock().reset();
    closed.send_replace(true);
}

async fn write_loop(mut writer: WireSink, mut rx: mpsc::UnboundedReceiver<String>, outbox: Outbox) {
    while let Some(line) = rx.recv().await {
        trace!(line = %line, "Sending");
        if let Err(e) = writer.send(line).await {
            warn!(error = %e, code = e.error_code(), "Write failed");
            outbox.detach();
            return;
        }
    }
    if let Err(e) = writer.close().await {
        debug!(error = %e, "Closing writer failed");
    }
}
