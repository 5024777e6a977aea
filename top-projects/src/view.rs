//! View tasks: hand an existing export to the CSV viewer.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::types::ViewOutcome;
use crate::export::export_exists;
use crate::io::delegate::ViewDelegate;

/// Open `path` in the viewer if it exists. Nothing else is done with it.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn view_export<V: ViewDelegate>(path: &Path, viewer: &V) -> Result<ViewOutcome> {
    if !export_exists(path)? {
        info!("no export to view");
        return Ok(ViewOutcome::Missing);
    }
    viewer
        .view(path)
        .with_context(|| format!("view {}", path.display()))?;
    Ok(ViewOutcome::Viewed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingViewDelegate;
    use std::fs;

    #[test]
    fn views_existing_export_by_exact_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("top-go-projects.csv");
        fs::write(&path, "name\n").expect("write");
        let viewer = RecordingViewDelegate::default();

        let outcome = view_export(&path, &viewer).expect("view");

        assert_eq!(outcome, ViewOutcome::Viewed);
        assert_eq!(viewer.calls(), vec![path.clone()]);
        assert_eq!(fs::read_to_string(&path).expect("read"), "name\n");
    }

    #[test]
    fn missing_export_skips_viewer() {
        let temp = tempfile::tempdir().expect("tempdir");
        let viewer = RecordingViewDelegate::default();

        let outcome = view_export(&temp.path().join("absent.csv"), &viewer).expect("view");

        assert_eq!(outcome, ViewOutcome::Missing);
        assert!(viewer.calls().is_empty());
    }
}
