//! The protocol engine: one decoded line in, state transitions out.
//!
//! `Engine` owns the session, the handler registry and the presentation
//! surface. It is a plain single-consumer state machine; the connection
//! layer wraps it in one mutex and enters it once per line.

use super::commands::Commands;
use super::readiness::ReadyTask;
use super::refresh::WhoisRefresh;
use crate::error::{ClientError, HandlerResult};
use crate::handlers::{Context, Handler, Registry};
use crate::hooks::{Hooks, LineSink, Target};
use crate::state::Session;
use slirc_proto::Line;
use tracing::{debug, warn};

pub struct Engine {
    session: Session,
    registry: Registry,
    commands: Commands,
    hooks: Box<dyn Hooks>,
    sink: Box<dyn LineSink>,
    refresh: WhoisRefresh,
}

impl Engine {
    /// Engine with every built-in handler and WHOIS refresh disabled.
    pub fn new(commands: Commands, hooks: Box<dyn Hooks>, sink: Box<dyn LineSink>) -> Self {
        Self {
            session: Session::new(),
            registry: Registry::with_defaults(),
            commands,
            hooks,
            sink,
            refresh: WhoisRefresh::disabled(),
        }
    }

    pub fn with_refresh(mut self, refresh: WhoisRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    /// Replace the registry, e.g. with an empty one.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn commands(&self) -> &Commands {
        &self.commands
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Append a handler for a command token or numeric.
    pub fn add_event_handler(&mut self, command: &str, handler: impl Handler + 'static) {
        self.registry.add(command, handler);
    }

    /// Decode one raw line and process it.
    pub fn handle_raw(&mut self, raw: &str) -> Line {
        let line = Line::parse(raw);
        self.handle_line(&line);
        line
    }

    /// Process one line to completion.
    ///
    /// Registered handlers run first, in registration order. The line is
    /// then logged and drawn regardless of whether any handler matched.
    /// Ready tasks released by this line run last.
    pub fn handle_line(&mut self, line: &Line) {
        let mut ctx = Context {
            session: &mut self.session,
            commands: &self.commands,
            hooks: self.hooks.as_mut(),
            sink: self.sink.as_mut(),
            refresh: &mut self.refresh,
        };
        let handled = self.registry.dispatch(&mut ctx, line);

        debug!(command = %line.command, handled, raw = %line.raw, "Line");
        self.sink.draw(Target::for_line(line), line);

        self.release_ready();
    }

    /// Show a locally generated line (e.g. an echo of what we sent).
    pub fn push_local(&mut self, target: Target, line: Line) {
        self.sink.push(target, line);
    }

    /// Run a task once the session is ready.
    ///
    /// Runs immediately when ready; otherwise queues it behind earlier
    /// tasks. Only immediate failures are returned.
    pub fn on_ready<F>(&mut self, task: F) -> HandlerResult
    where
        F: FnOnce(&Commands) -> Result<(), ClientError> + Send + 'static,
    {
        self.on_ready_tasks(vec![Box::new(task)])
    }

    /// Submit several tasks, preserving their order.
    ///
    /// Every immediately runnable task runs even if an earlier one fails;
    /// the first failure is returned.
    pub fn on_ready_tasks(&mut self, tasks: Vec<ReadyTask>) -> HandlerResult {
        let mut first_err = None;
        for task in tasks {
            if let Some(task) = self.session.gate.submit(task)
                && let Err(e) = task(&self.commands)
            {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Drop the session (disconnect): clears state and queued ready tasks.
    pub fn reset(&mut self) {
        self.session.reset();
        self.refresh.clear();
    }

    fn release_ready(&mut self) {
        let tasks = self.session.gate.take_released();
        if tasks.is_empty() {
            return;
        }
        debug!(count = tasks.len(), "Releasing ready tasks");
        for task in tasks {
            if let Err(e) = task(&self.commands) {
                warn!(error = %e, code = e.error_code(), "Ready task failed");
            }
        }
    }
}
