//! Events streamed from a run to an interactive consumer

use std::sync::mpsc::Sender;

use crate::log_sink::LogRecord;
use crate::orchestrator::RunReport;

/// Something that happened during a run.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A resource-level action log line
    Log(LogRecord),
    /// Applications processed so far, emitted once per application
    Progress { completed: usize, total: usize },
    /// The run ended; always the last event
    Finished(RunReport),
}

/// Sending half handed to the orchestrator. A dropped receiver is ignored.
#[derive(Debug, Clone, Default)]
pub struct EventSender {
    inner: Option<Sender<RunEvent>>,
}

impl EventSender {
    pub fn new(sender: Sender<RunEvent>) -> Self {
        Self {
            inner: Some(sender),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn send(&self, event: RunEvent) {
        if let Some(sender) = &self.inner
            && sender.send(event).is_err()
        {
            tracing::trace!("Event receiver dropped");
        }
    }
}
