//! Shared deterministic types for export and view tasks.
//!
//! These types define stable contracts between the task table, the export
//! guard and the delegates. They carry no I/O handles.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One export job: an ecosystem plus popularity bounds and the target CSV.
///
/// Fields are handed to the fetch program verbatim. `min_stars <= max_stars`
/// is expected but not checked here; the fetch program owns that decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRequest {
    pub ecosystem: String,
    pub min_stars: u64,
    pub max_stars: u64,
    pub output: PathBuf,
    /// Passed as `--min-forks` only when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_forks: Option<u64>,
}

impl DatasetRequest {
    pub fn new(
        ecosystem: impl Into<String>,
        min_stars: u64,
        max_stars: u64,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            min_stars,
            max_stars,
            output: output.into(),
            min_forks: None,
        }
    }

    pub fn with_min_forks(self, min_forks: Option<u64>) -> Self {
        Self { min_forks, ..self }
    }
}

/// Why an export was not delegated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyExists => f.write_str("already exists"),
        }
    }
}

/// Result of the idempotent export guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The output file was already present; the fetch program was not run.
    Skipped { reason: SkipReason },
    /// The fetch program was invoked and exited successfully.
    Delegated,
}

/// Result of a view task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// The viewer was invoked with the export path.
    Viewed,
    /// No export file exists at the path; the viewer was not run.
    Missing,
}

/// A resolved, runnable task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Fetch(DatasetRequest),
    View { ecosystem: String, path: PathBuf },
}

impl Task {
    /// Export path the task reads or produces.
    pub fn path(&self) -> &Path {
        match self {
            Task::Fetch(request) => &request.output,
            Task::View { path, .. } => path,
        }
    }
}
