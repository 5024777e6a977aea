//! Naming conventions for export files and task ids.

use std::path::PathBuf;

pub const DEFAULT_MIN_STARS: u64 = 25_000;
pub const DEFAULT_MAX_STARS: u64 = 40_000;

/// Conventional export path for an ecosystem: `top-<ecosystem>-projects.csv`.
pub fn default_output_path(ecosystem: &str) -> PathBuf {
    PathBuf::from(format!("top-{ecosystem}-projects.csv"))
}

/// Task id that fetches an ecosystem's export.
pub fn fetch_task_id(ecosystem: &str) -> String {
    format!("top-{ecosystem}")
}

/// Task id that opens an ecosystem's export in the viewer.
pub fn view_task_id(ecosystem: &str) -> String {
    format!("{ecosystem}-view")
}
