//! Run the orchestrator on a worker thread and stream its events

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::events::{EventSender, RunEvent};
use crate::orchestrator::{Orchestrator, RunOptions, RunReport};
use crate::{Error, Result};

/// A run in progress on its own thread.
///
/// The event channel closes when the worker finishes; the last event of a
/// run that started is [`RunEvent::Finished`].
pub struct RunHandle {
    events: Receiver<RunEvent>,
    join: JoinHandle<Result<RunReport>>,
}

impl RunHandle {
    pub fn events(&self) -> &Receiver<RunEvent> {
        &self.events
    }

    /// Block until the worker ends and return its result.
    pub fn wait(self) -> Result<RunReport> {
        drop(self.events);
        self.join.join().map_err(|_| Error::WorkerPanicked)?
    }
}

/// Start `orchestrator` on a worker thread.
///
/// Applications are processed sequentially on that thread; the caller only
/// shares the event channel with it.
pub fn spawn_run(
    orchestrator: Orchestrator,
    apps: Vec<String>,
    options: RunOptions,
) -> Result<RunHandle> {
    let (tx, rx) = mpsc::channel();
    let mut orchestrator = orchestrator.with_events(EventSender::new(tx));

    let join = thread::Builder::new()
        .name("appvault-run".into())
        .spawn(move || orchestrator.run(&apps, &options))?;

    Ok(RunHandle { events: rx, join })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunContext;
    use crate::registry::MemoryRegistry;
    use std::sync::Arc;
    use tempfile::TempDir;
    use vault_fs::{BackupLayout, Environment};
    use vault_meta::{Catalog, ResourceSpec};

    #[test]
    fn events_end_with_finished() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("src")).unwrap();
        std::fs::write(temp.path().join("src/a.cfg"), "a").unwrap();
        let env = Environment::empty().with_var("SRC", temp.path().join("src").to_string_lossy());
        let ctx = RunContext::new(BackupLayout::new(temp.path().join("Backup")))
            .with_env(env)
            .with_registry(Arc::new(MemoryRegistry::new()));
        let mut catalog = Catalog::new();
        catalog.insert("App", ResourceSpec::new().with_file("%SRC%/a.cfg"));

        let handle = spawn_run(
            Orchestrator::new(ctx, catalog),
            vec!["App".into(), "Other".into()],
            RunOptions::backup(false),
        )
        .unwrap();

        let events: Vec<RunEvent> = handle.events().iter().collect();
        let report = handle.wait().unwrap();

        assert!(matches!(events.last(), Some(RunEvent::Finished(r)) if r == &report));
        let progress = events
            .iter()
            .filter(|e| matches!(e, RunEvent::Progress { .. }))
            .count();
        assert_eq!(progress, 2);
        assert!(events.iter().any(|e| matches!(e, RunEvent::Log(_))));
        assert!(temp.path().join("Backup/App/a.cfg").is_file());
    }
}
