//! Orchestrator: run backup or restore over a list of applications
//!
//! Applications are processed strictly in caller order, each independently.
//! A failure inside one application is recorded in its report and the loop
//! moves on; only a held run lock stops a run before it starts.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use vault_fs::validate_path_identifier;
use vault_meta::{Catalog, ResourceKind, ResourceSpec};

use crate::archive::{ArchiveOutcome, compress};
use crate::capture::{capture_file, capture_folder, capture_registry_key, resolve};
use crate::context::RunContext;
use crate::events::{EventSender, RunEvent};
use crate::installed::InstalledApps;
use crate::lock::RunLock;
use crate::outcome::ResourceOutcome;
use crate::probe::ResourceProbe;
use crate::restore::{RestoreTarget, restore_file, restore_folder, restore_registry_key};
use crate::Result;

/// What a run does to every application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    Backup { compress: bool },
    Restore { target: RestoreTarget },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Backup { .. } => "backup",
            Self::Restore { .. } => "restore",
        }
    }
}

/// Options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: Mode,
    /// Skip applications not detected as installed
    pub installed_only: bool,
}

impl RunOptions {
    pub fn backup(compress: bool) -> Self {
        Self {
            mode: Mode::Backup { compress },
            installed_only: false,
        }
    }

    pub fn restore(target: RestoreTarget) -> Self {
        Self {
            mode: Mode::Restore { target },
            installed_only: false,
        }
    }

    pub fn with_installed_only(mut self, installed_only: bool) -> Self {
        self.installed_only = installed_only;
        self
    }
}

/// Lifecycle of an orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// Why an application was not processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    UnknownApplication,
    NotInstalled,
    InvalidName { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownApplication => f.write_str("unknown application"),
            Self::NotInstalled => f.write_str("not installed"),
            Self::InvalidName { message } => write!(f, "invalid name: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStatus {
    Processed,
    Skipped(SkipReason),
}

/// Result for one requested application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppReport {
    pub app: String,
    pub status: AppStatus,
    pub outcomes: Vec<ResourceOutcome>,
    /// At least one declared resource existed
    pub data_found: bool,
    pub archive: ArchiveOutcome,
}

impl AppReport {
    fn processed(app: &str, outcomes: Vec<ResourceOutcome>, archive: ArchiveOutcome) -> Self {
        let data_found = outcomes.iter().any(ResourceOutcome::found);
        Self {
            app: app.to_string(),
            status: AppStatus::Processed,
            outcomes,
            data_found,
            archive,
        }
    }

    fn skipped(app: &str, reason: SkipReason) -> Self {
        Self {
            app: app.to_string(),
            status: AppStatus::Skipped(reason),
            outcomes: Vec::new(),
            data_found: false,
            archive: ArchiveOutcome::NotRequested,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, AppStatus::Skipped(_))
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            AppStatus::Skipped(reason) => Some(reason),
            AppStatus::Processed => None,
        }
    }

    /// Outcomes that completed.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// Outcomes that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error().is_some()).count()
    }

    pub fn outcomes_of(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceOutcome> {
        self.outcomes.iter().filter(move |o| o.kind == kind)
    }
}

/// Result of a whole run, one entry per requested name in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    pub root: PathBuf,
    pub apps: Vec<AppReport>,
}

impl RunReport {
    pub fn app(&self, name: &str) -> Option<&AppReport> {
        self.apps.iter().find(|a| a.app == name)
    }

    pub fn processed(&self) -> usize {
        self.apps.iter().filter(|a| !a.is_skipped()).count()
    }

    pub fn skipped(&self) -> usize {
        self.apps.iter().filter(|a| a.is_skipped()).count()
    }

    /// Every failed resource with the application it belongs to.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ResourceOutcome)> {
        self.apps.iter().flat_map(|a| {
            a.outcomes
                .iter()
                .filter(|o| o.error().is_some())
                .map(move |o| (a.app.as_str(), o))
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Drives capture, restore and archiving for a list of applications.
pub struct Orchestrator {
    ctx: RunContext,
    catalog: Catalog,
    installed: Option<InstalledApps>,
    state: RunState,
}

impl Orchestrator {
    pub fn new(ctx: RunContext, catalog: Catalog) -> Self {
        Self {
            ctx,
            catalog,
            installed: None,
            state: RunState::Idle,
        }
    }

    /// Use a known installed set instead of asking the registry backend.
    pub fn with_installed(mut self, installed: InstalledApps) -> Self {
        self.installed = Some(installed);
        self
    }

    /// Route run events to `events`.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.ctx = self.ctx.with_events(events);
        self
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Process `apps` in order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RunInProgress`] when another run holds the
    /// backup root. Per-application problems never produce an error.
    pub fn run<S: AsRef<str>>(&mut self, apps: &[S], options: &RunOptions) -> Result<RunReport> {
        let _lock = RunLock::acquire(self.ctx.layout())?;
        self.state = RunState::Running;

        let installed = if options.installed_only {
            Some(
                self.installed
                    .clone()
                    .unwrap_or_else(|| InstalledApps::detect(self.ctx.registry())),
            )
        } else {
            None
        };

        let total = apps.len();
        tracing::info!(mode = options.mode.name(), total, root = %self.ctx.layout().root().display(), "Run started");

        let mut reports = Vec::with_capacity(total);
        for (index, app) in apps.iter().enumerate() {
            let app = app.as_ref().trim();
            let report = self.process(app, options, installed.as_ref());
            reports.push(report);
            self.ctx.send(RunEvent::Progress {
                completed: index + 1,
                total,
            });
        }

        let report = RunReport {
            mode: options.mode.clone(),
            root: self.ctx.layout().display_root(),
            apps: reports,
        };
        self.ctx.info(format!(
            "{} finished: {} processed, {} skipped",
            options.mode.name(),
            report.processed(),
            report.skipped()
        ));
        self.state = RunState::Completed;
        self.ctx.send(RunEvent::Finished(report.clone()));
        Ok(report)
    }

    fn process(
        &self,
        app: &str,
        options: &RunOptions,
        installed: Option<&InstalledApps>,
    ) -> AppReport {
        let Some(spec) = self.catalog.get(app) else {
            return self.skip(app, SkipReason::UnknownApplication);
        };
        if let Err(message) = validate_path_identifier(app, "application name") {
            return self.skip(app, SkipReason::InvalidName { message });
        }
        if let Some(installed) = installed
            && !installed.allows(app)
        {
            return self.skip(app, SkipReason::NotInstalled);
        }

        let _span = tracing::info_span!("app", app).entered();
        match &options.mode {
            Mode::Backup { compress } => self.backup_app(app, spec, *compress),
            Mode::Restore { target } => self.restore_app(app, spec, target),
        }
    }

    fn skip(&self, app: &str, reason: SkipReason) -> AppReport {
        self.ctx.warn(format!("skipped {app}: {reason}"));
        AppReport::skipped(app, reason)
    }

    fn backup_app(&self, app: &str, spec: &ResourceSpec, compress_requested: bool) -> AppReport {
        let layout = self.ctx.layout();
        let out_dir = layout.app_dir(app);
        if let Err(e) = fs::create_dir_all(&out_dir) {
            self.ctx
                .error(format!("create {}: {e}", out_dir.display()));
        }

        let probe = ResourceProbe::new(&self.ctx);
        let registry_available = self.ctx.registry().is_available();
        let mut outcomes = Vec::with_capacity(spec.len());
        let mut exported = 0;

        for (kind, entry) in spec.iter() {
            if kind == ResourceKind::Registry && !registry_available {
                self.ctx
                    .warn(format!("export registry {entry}: registry not available"));
                outcomes.push(ResourceOutcome::unsupported(kind, entry));
                continue;
            }
            if !probe.should_capture(kind, entry) {
                tracing::debug!(kind = %kind, path = entry, "Not present");
                outcomes.push(ResourceOutcome::not_found(kind, entry));
                continue;
            }
            let outcome = match kind {
                ResourceKind::File => capture_file(&self.ctx, entry, &out_dir),
                ResourceKind::Folder => capture_folder(&self.ctx, entry, &out_dir),
                ResourceKind::Registry => {
                    let out_file = layout.registry_file(app, exported);
                    let outcome = capture_registry_key(&self.ctx, entry, &out_file);
                    if outcome.succeeded() {
                        exported += 1;
                    }
                    outcome
                }
            };
            outcomes.push(outcome);
        }

        if exported > 0 {
            self.prune_registry_exports(app, exported);
        }

        let captured = outcomes.iter().any(ResourceOutcome::succeeded);
        if !outcomes.iter().any(ResourceOutcome::found) {
            self.ctx.info(format!("no data for {app}"));
        }

        let archive = if !compress_requested {
            ArchiveOutcome::NotRequested
        } else if !captured {
            ArchiveOutcome::NoData
        } else {
            match compress(&out_dir, &layout.archive_base(app)) {
                Ok(artifact) => {
                    self.ctx
                        .info(format!("created archive {}", artifact.path.display()));
                    ArchiveOutcome::Created(artifact)
                }
                Err(e) => {
                    self.ctx.error(format!("archive {app}: {e}"));
                    ArchiveOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            }
        };

        AppReport::processed(app, outcomes, archive)
    }

    /// Remove numbered exports left over from a run that captured more keys.
    fn prune_registry_exports(&self, app: &str, exported: usize) {
        let mut index = exported;
        loop {
            let stale = self.ctx.layout().registry_file(app, index);
            if !stale.is_file() {
                break;
            }
            match fs::remove_file(&stale) {
                Ok(()) => tracing::debug!(path = %stale.display(), "Removed stale registry export"),
                Err(e) => {
                    self.ctx
                        .warn(format!("remove stale export {}: {e}", stale.display()));
                    break;
                }
            }
            index += 1;
        }
    }

    fn restore_app(&self, app: &str, spec: &ResourceSpec, target: &RestoreTarget) -> AppReport {
        let layout = self.ctx.layout();
        let mut outcomes = Vec::with_capacity(spec.len());

        for kind in [ResourceKind::File, ResourceKind::Folder] {
            for entry in spec.entries(kind) {
                let resolved = resolve(&self.ctx, entry)
                    .zip(target.destination(self.ctx.env(), entry));
                let Some(((_, base), dest)) = resolved else {
                    self.ctx
                        .error(format!("restore {kind} {entry}: path has no base name"));
                    outcomes.push(ResourceOutcome::failed(kind, entry.as_str(), "path has no base name"));
                    continue;
                };
                let captured = layout.captured_path(app, &base);
                let outcome = match kind {
                    ResourceKind::File => restore_file(&self.ctx, &captured, &dest),
                    _ => restore_folder(&self.ctx, &captured, &dest),
                };
                outcomes.push(outcome);
            }
        }

        if !spec.registry.is_empty() {
            let files = layout.registry_files(app);
            if files.is_empty() {
                let primary = layout.registry_file(app, 0);
                outcomes.push(ResourceOutcome::not_found(
                    ResourceKind::Registry,
                    primary.display().to_string(),
                ));
            }
            for file in files {
                outcomes.push(restore_registry_key(&self.ctx, &file));
            }
        }

        if !outcomes.iter().any(ResourceOutcome::found) {
            self.ctx.info(format!("no backup data for {app}"));
        }

        AppReport::processed(app, outcomes, ArchiveOutcome::NotRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::OutcomeStatus;
    use crate::registry::{MemoryRegistry, UnsupportedRegistry};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::mpsc;
    use tempfile::TempDir;
    use vault_fs::{BackupLayout, Environment};

    struct Fixture {
        temp: TempDir,
        registry: Arc<MemoryRegistry>,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir_all(temp.path().join("home/Editor/themes")).unwrap();
            fs::write(temp.path().join("home/Editor/settings.ini"), "font=12").unwrap();
            fs::write(temp.path().join("home/Editor/themes/dark.json"), "{}").unwrap();
            let registry = Arc::new(
                MemoryRegistry::new()
                    .with_key(r"HKCU\Software\Editor", "\"a\"=\"1\"")
                    .with_key(r"HKCU\Software\EditorPlugins", "\"b\"=\"2\""),
            );
            Self { temp, registry }
        }

        fn context(&self) -> RunContext {
            let env = Environment::empty().with_var("HOME", self.temp.path().join("home").to_string_lossy());
            RunContext::new(BackupLayout::new(self.temp.path().join("Backup")))
                .with_env(env)
                .with_registry(self.registry.clone())
        }

        fn catalog(&self) -> Catalog {
            let mut catalog = Catalog::new();
            catalog.insert(
                "Editor",
                ResourceSpec::new()
                    .with_file(r"%HOME%\Editor\settings.ini")
                    .with_file(r"%HOME%\Editor\missing.ini")
                    .with_folder(r"%HOME%\Editor\themes")
                    .with_registry(r"HKCU\Software\Editor")
                    .with_registry(r"HKCU\Software\EditorPlugins"),
            );
            catalog.insert("Ghost", ResourceSpec::new().with_folder(r"%HOME%\Ghost"));
            catalog
        }

        fn backup_dir(&self) -> PathBuf {
            self.temp.path().join("Backup")
        }
    }

    #[test]
    fn backup_captures_and_archives() {
        let fx = Fixture::new();
        let mut orchestrator = Orchestrator::new(fx.context(), fx.catalog());
        assert_eq!(orchestrator.state(), RunState::Idle);

        let report = orchestrator.run(&["Editor"], &RunOptions::backup(true)).unwrap();

        assert_eq!(orchestrator.state(), RunState::Completed);
        let editor = report.app("Editor").unwrap();
        assert!(editor.data_found);
        assert_eq!(editor.succeeded(), 4);
        assert_eq!(editor.failed(), 0);
        assert!(matches!(editor.archive, ArchiveOutcome::Created(_)));
        let out = fx.backup_dir().join("Editor");
        assert!(out.join("settings.ini").is_file());
        assert!(out.join("themes/dark.json").is_file());
        assert!(out.join("Editor_reg.reg").is_file());
        assert!(out.join("Editor_reg_2.reg").is_file());
        assert!(fx.backup_dir().join("Editor_backup.zip").is_file());
    }

    #[test]
    fn unknown_application_does_not_stop_batch() {
        let fx = Fixture::new();
        let mut orchestrator = Orchestrator::new(fx.context(), fx.catalog());

        let report = orchestrator
            .run(&["Editor", "Unknown", "Ghost"], &RunOptions::backup(false))
            .unwrap();

        assert_eq!(report.apps.len(), 3);
        assert_eq!(
            report.app("Unknown").unwrap().skip_reason(),
            Some(&SkipReason::UnknownApplication)
        );
        assert!(!report.app("Editor").unwrap().is_skipped());
        assert!(!report.app("Ghost").unwrap().is_skipped());
    }

    #[test]
    fn all_absent_application_is_never_archived() {
        let fx = Fixture::new();
        let mut orchestrator = Orchestrator::new(fx.context(), fx.catalog());

        let report = orchestrator.run(&["Ghost"], &RunOptions::backup(true)).unwrap();

        let ghost = report.app("Ghost").unwrap();
        assert!(!ghost.data_found);
        assert_eq!(ghost.archive, ArchiveOutcome::NoData);
        assert!(!fx.backup_dir().join("Ghost_backup.zip").exists());
    }

    #[test]
    fn progress_after_every_application() {
        let fx = Fixture::new();
        let (tx, rx) = mpsc::channel();
        let ctx = fx.context().with_events(EventSender::new(tx));
        let mut orchestrator = Orchestrator::new(ctx, fx.catalog());

        orchestrator
            .run(&["Editor", "Unknown", "Ghost"], &RunOptions::backup(false))
            .unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        let progress: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RunEvent::Progress { completed, total } => Some((*completed, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
        assert!(matches!(events.last(), Some(RunEvent::Finished(_))));
        assert!(events.iter().any(|e| matches!(e, RunEvent::Log(r) if r.message == "no data for Ghost")));
    }

    #[test]
    fn restore_to_custom_root() {
        let fx = Fixture::new();
        let mut orchestrator = Orchestrator::new(fx.context(), fx.catalog());
        orchestrator.run(&["Editor"], &RunOptions::backup(false)).unwrap();
        fx.registry.remove_key(r"HKCU\Software\Editor");

        let target = fx.temp.path().join("restored");
        let report = orchestrator
            .run(&["Editor"], &RunOptions::restore(RestoreTarget::CustomRoot(target.clone())))
            .unwrap();

        let editor = report.app("Editor").unwrap();
        assert_eq!(fs::read_to_string(target.join("settings.ini")).unwrap(), "font=12");
        assert!(target.join("themes/dark.json").is_file());
        assert_eq!(editor.outcomes_of(ResourceKind::Registry).filter(|o| o.succeeded()).count(), 2);
        assert!(fx.registry.contains_key(r"HKCU\Software\Editor"));
        let missing = editor
            .outcomes_of(ResourceKind::File)
            .find(|o| o.source.ends_with("missing.ini"))
            .unwrap();
        assert_eq!(missing.status, OutcomeStatus::NotFound);
    }

    #[test]
    fn registry_unsupported_is_reported() {
        let fx = Fixture::new();
        let ctx = fx.context().with_registry(Arc::new(UnsupportedRegistry));
        let mut orchestrator = Orchestrator::new(ctx, fx.catalog());

        let report = orchestrator.run(&["Editor"], &RunOptions::backup(false)).unwrap();

        let registry: Vec<_> = report
            .app("Editor")
            .unwrap()
            .outcomes_of(ResourceKind::Registry)
            .map(|o| o.status.clone())
            .collect();
        assert_eq!(registry, vec![OutcomeStatus::Unsupported, OutcomeStatus::Unsupported]);
    }

    #[test]
    fn installed_only_filter() {
        let fx = Fixture::new();
        let mut catalog = fx.catalog();
        catalog.insert("MyTool", ResourceSpec::new().with_folder(r"%HOME%\Editor\themes"));
        let mut orchestrator = Orchestrator::new(fx.context(), catalog)
            .with_installed(InstalledApps::from_names(["Editor"]));

        let report = orchestrator
            .run(
                &["Editor", "Ghost", "MyTool"],
                &RunOptions::backup(false).with_installed_only(true),
            )
            .unwrap();

        assert!(!report.app("Editor").unwrap().is_skipped());
        assert_eq!(
            report.app("Ghost").unwrap().skip_reason(),
            Some(&SkipReason::NotInstalled)
        );
        assert!(!report.app("MyTool").unwrap().is_skipped());
    }

    #[test]
    fn fewer_keys_prune_old_exports() {
        let fx = Fixture::new();
        let mut orchestrator = Orchestrator::new(fx.context(), fx.catalog());
        orchestrator.run(&["Editor"], &RunOptions::backup(false)).unwrap();
        let second = fx.backup_dir().join("Editor/Editor_reg_2.reg");
        assert!(second.is_file());

        fx.registry.remove_key(r"HKCU\Software\EditorPlugins");
        orchestrator.run(&["Editor"], &RunOptions::backup(false)).unwrap();

        assert!(!second.exists());
        assert!(fx.backup_dir().join("Editor/Editor_reg.reg").is_file());
    }

    #[test]
    fn held_lock_is_fatal() {
        let fx = Fixture::new();
        let ctx = fx.context();
        let _held = RunLock::acquire(ctx.layout()).unwrap();
        let mut orchestrator = Orchestrator::new(ctx, fx.catalog());

        let result = orchestrator.run(&["Editor"], &RunOptions::backup(false));

        assert!(matches!(result, Err(crate::Error::RunInProgress { .. })));
        assert_eq!(orchestrator.state(), RunState::Idle);
    }
}
