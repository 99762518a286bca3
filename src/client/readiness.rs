//! Readiness gate: defers queued actions until the greeting completes.
//!
//! Tasks submitted before readiness are held in a FIFO and released once,
//! in submission order, after the line that made the session ready has
//! finished dispatching. Tasks submitted after readiness run immediately
//! unless earlier tasks are still waiting, in which case they queue behind
//! them.

use super::commands::Commands;
use crate::error::ClientError;
use std::collections::VecDeque;
use std::fmt;

/// Deferred action run against the command encoder.
pub type ReadyTask = Box<dyn FnOnce(&Commands) -> Result<(), ClientError> + Send>;

/// Ready flag plus the queue of deferred tasks.
#[derive(Default)]
pub struct ReadinessGate {
    ready: bool,
    queue: VecDeque<ReadyTask>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Offer a task. Returns it back when it may run right now.
    pub fn submit(&mut self, task: ReadyTask) -> Option<ReadyTask> {
        if self.ready && self.queue.is_empty() {
            Some(task)
        } else {
            self.queue.push_back(task);
            None
        }
    }

    /// Set the ready flag. Returns `true` on the false-to-true transition.
    pub fn mark_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.ready, true)
    }

    /// Take every queued task if the session is ready.
    ///
    /// Each task is handed out exactly once.
    pub fn take_released(&mut self) -> Vec<ReadyTask> {
        if !self.ready {
            return Vec::new();
        }
        self.queue.drain(..).collect()
    }

    /// Clear the flag and discard queued tasks. Returns how many were dropped.
    pub fn reset(&mut self) -> usize {
        self.ready = false;
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }
}

impl fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("ready", &self.ready)
            .field("pending", &self.queue.len())
            .finish()
    }
}
