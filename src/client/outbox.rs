//! Outgoing line slot shared by every command handle.
//!
//! The connection layer attaches the writer task's sender on connect and
//! detaches it on teardown; all clones observe the change.

use crate::error::ClientError;
use parking_lot::Mutex;
use slirc_proto::sanitize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handle to the current connection's outgoing queue, if any.
#[derive(Clone, Default)]
pub struct Outbox {
    slot: Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached outbox plus the receiving end, for tests and embedders that
    /// drive the wire themselves.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let outbox = Self::new();
        outbox.attach(tx);
        (outbox, rx)
    }

    pub fn attach(&self, tx: mpsc::UnboundedSender<String>) {
        *self.slot.lock() = Some(tx);
    }

    pub fn detach(&self) {
        self.slot.lock().take();
    }

    /// Whether a connection is attached and still accepting lines.
    pub fn is_connected(&self) -> bool {
        self.slot.lock().as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Queue one raw line for the transport.
    ///
    /// Text after the first line break is dropped.
    pub fn send(&self, line: &str) -> Result<(), ClientError> {
        let line = sanitize(line);
        let guard = self.slot.lock();
        let tx = guard.as_ref().ok_or(ClientError::NotConnected)?;
        if line.is_empty() {
            return Err(slirc_proto::ProtocolError::EmptyLine.into());
        }
        tx.send(line.to_owned())
            .map_err(|_| ClientError::NotConnected)
    }
}

impl std::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outbox")
            .field("connected", &self.is_connected())
            .finish()
    }
}
