//! Explicit run context passed into every engine operation

use std::sync::Arc;

use vault_fs::{BackupLayout, Environment};

use crate::events::{EventSender, RunEvent};
use crate::log_sink::{LogLevel, LogRecord, LogSink};
use crate::registry::{RegistryBackend, platform_backend};

/// Everything an engine operation needs besides its arguments: the backup
/// root, the environment snapshot, the registry backend and where action
/// records go.
#[derive(Clone)]
pub struct RunContext {
    layout: BackupLayout,
    env: Environment,
    registry: Arc<dyn RegistryBackend>,
    log: LogSink,
    events: EventSender,
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("layout", &self.layout)
            .field("env_vars", &self.env.len())
            .field("registry", &self.registry.name())
            .field("log", &self.log)
            .finish()
    }
}

impl RunContext {
    /// Context for `layout` with the process environment captured now and
    /// the platform registry backend. Logging to a file is off until
    /// [`RunContext::with_log`] is called.
    pub fn new(layout: BackupLayout) -> Self {
        Self {
            layout,
            env: Environment::from_process(),
            registry: platform_backend(),
            log: LogSink::disabled(),
            events: EventSender::none(),
        }
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn RegistryBackend>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_log(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }

    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    pub fn layout(&self) -> &BackupLayout {
        &self.layout
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn registry(&self) -> &dyn RegistryBackend {
        self.registry.as_ref()
    }

    pub fn log_sink(&self) -> &LogSink {
        &self.log
    }

    pub(crate) fn send(&self, event: RunEvent) {
        self.events.send(event);
    }

    /// Record an action: tracing, the log file and the event channel.
    pub fn record(&self, level: LogLevel, message: impl Into<String>) {
        let record = LogRecord::new(level, message);
        match level {
            LogLevel::Info => tracing::info!("{}", record.message),
            LogLevel::Warn => tracing::warn!("{}", record.message),
            LogLevel::Error => tracing::error!("{}", record.message),
        }
        self.log.write(&record);
        self.events.send(RunEvent::Log(record));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.record(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(LogLevel::Error, message);
    }
}
