//! Idempotent export guard for fetch tasks.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::types::{DatasetRequest, ExportOutcome, SkipReason};
use crate::io::delegate::FetchDelegate;

/// Run the fetch delegate unless the export file already exists.
///
/// An existing file is never touched; regeneration requires deleting it
/// first. The delegate's result is not validated. Check-then-delegate is not
/// atomic, so concurrent runs on one path may both delegate.
#[instrument(skip_all, fields(ecosystem = %request.ecosystem, output = %request.output.display()))]
pub fn ensure_export<D: FetchDelegate>(
    request: &DatasetRequest,
    delegate: &D,
) -> Result<ExportOutcome> {
    if export_exists(&request.output)? {
        info!("export exists, skipping fetch");
        return Ok(ExportOutcome::Skipped {
            reason: SkipReason::AlreadyExists,
        });
    }
    delegate
        .fetch(request)
        .with_context(|| format!("fetch {}", request.output.display()))?;
    info!("fetch delegated");
    Ok(ExportOutcome::Delegated)
}

/// True if something exists at `path`. Permission errors propagate.
pub fn export_exists(path: &Path) -> Result<bool> {
    path.try_exists()
        .with_context(|| format!("check {}", path.display()))
}

/// Operator notice for a skipped export.
pub fn skip_notice(path: &Path, reason: SkipReason) -> String {
    format!("{} {reason}; delete it to regenerate.", path.display())
}
