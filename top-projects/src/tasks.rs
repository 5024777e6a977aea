//! Named task table built from the configured datasets.
//!
//! Every dataset contributes `top-<ecosystem>` (fetch) and `<ecosystem>-view`
//! (view). A view task always reads its own dataset's export path.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::core::naming::{fetch_task_id, view_task_id};
use crate::core::types::{DatasetRequest, Task};
use crate::io::config::ProjectConfig;

/// Task description for `top-projects list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TaskInfo {
    Fetch {
        id: String,
        #[serde(flatten)]
        request: DatasetRequest,
    },
    View {
        id: String,
        ecosystem: String,
        path: PathBuf,
    },
}

/// Task ids in dataset order, fetch before view.
pub fn task_ids(config: &ProjectConfig) -> Vec<String> {
    config
        .datasets
        .iter()
        .flat_map(|d| [fetch_task_id(&d.ecosystem), view_task_id(&d.ecosystem)])
        .collect()
}

/// Describe every task, in the same order as [`task_ids`].
pub fn describe_tasks(config: &ProjectConfig) -> Vec<TaskInfo> {
    config
        .datasets
        .iter()
        .flat_map(|d| {
            [
                TaskInfo::Fetch {
                    id: fetch_task_id(&d.ecosystem),
                    request: d.request(),
                },
                TaskInfo::View {
                    id: view_task_id(&d.ecosystem),
                    ecosystem: d.ecosystem.clone(),
                    path: d.output_path(),
                },
            ]
        })
        .collect()
}

/// Resolve a task id against the configured datasets.
pub fn resolve_task(config: &ProjectConfig, id: &str) -> Result<Task> {
    for dataset in &config.datasets {
        if id == fetch_task_id(&dataset.ecosystem) {
            return Ok(Task::Fetch(dataset.request()));
        }
        if id == view_task_id(&dataset.ecosystem) {
            return Ok(Task::View {
                ecosystem: dataset.ecosystem.clone(),
                path: dataset.output_path(),
            });
        }
    }
    Err(anyhow!(
        "unknown task '{id}' (known tasks: {})",
        task_ids(config).join(", ")
    ))
}
