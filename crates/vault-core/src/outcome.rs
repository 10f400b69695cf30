//! Per-resource results of capture and restore

use std::path::PathBuf;

use serde::Serialize;
use vault_meta::ResourceKind;

/// How a single resource operation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Copied, exported or imported
    Done { destination: PathBuf },
    /// Nothing to act on
    NotFound,
    /// Found, but the operation failed
    Failed { error: String },
    /// No registry on this platform
    Unsupported,
}

/// Outcome of one capture or restore step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceOutcome {
    pub kind: ResourceKind,
    /// Declared or captured identifier the step acted on
    pub source: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl ResourceOutcome {
    pub fn new(kind: ResourceKind, source: impl Into<String>, status: OutcomeStatus) -> Self {
        Self {
            kind,
            source: source.into(),
            status,
        }
    }

    pub fn done(kind: ResourceKind, source: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self::new(
            kind,
            source,
            OutcomeStatus::Done {
                destination: destination.into(),
            },
        )
    }

    pub fn not_found(kind: ResourceKind, source: impl Into<String>) -> Self {
        Self::new(kind, source, OutcomeStatus::NotFound)
    }

    pub fn failed(kind: ResourceKind, source: impl Into<String>, error: impl ToString) -> Self {
        Self::new(
            kind,
            source,
            OutcomeStatus::Failed {
                error: error.to_string(),
            },
        )
    }

    pub fn unsupported(kind: ResourceKind, source: impl Into<String>) -> Self {
        Self::new(kind, source, OutcomeStatus::Unsupported)
    }

    /// The resource existed and the step acted on it.
    pub fn found(&self) -> bool {
        matches!(
            self.status,
            OutcomeStatus::Done { .. } | OutcomeStatus::Failed { .. }
        )
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.status, OutcomeStatus::Done { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<&PathBuf> {
        match &self.status {
            OutcomeStatus::Done { destination } => Some(destination),
            _ => None,
        }
    }
}
