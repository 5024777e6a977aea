//! Test-only delegates that record invocations instead of spawning programs.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::types::DatasetRequest;
use crate::io::delegate::{DelegateFailure, FetchDelegate, ViewDelegate};

/// Fetch delegate that records each request and optionally writes the output.
#[derive(Debug, Default)]
pub struct RecordingFetchDelegate {
    calls: RefCell<Vec<DatasetRequest>>,
    contents: Option<String>,
    fail_with: Option<i32>,
}

impl RecordingFetchDelegate {
    /// Records calls and writes `contents` to the requested output path.
    pub fn writing(contents: &str) -> Self {
        Self {
            contents: Some(contents.to_string()),
            ..Self::default()
        }
    }

    /// Records calls and fails as if the program exited with `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            fail_with: Some(code),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<DatasetRequest> {
        self.calls.borrow().clone()
    }
}

impl FetchDelegate for RecordingFetchDelegate {
    fn fetch(&self, request: &DatasetRequest) -> Result<()> {
        self.calls.borrow_mut().push(request.clone());
        if let Some(code) = self.fail_with {
            return Err(DelegateFailure::Exited {
                program: "fake-fetch".to_string(),
                code,
            }
            .into());
        }
        if let Some(contents) = &self.contents {
            fs::write(&request.output, contents)
                .with_context(|| format!("write {}", request.output.display()))?;
        }
        Ok(())
    }
}

/// View delegate that records each path it is asked to open.
#[derive(Debug, Default)]
pub struct RecordingViewDelegate {
    calls: RefCell<Vec<PathBuf>>,
}

impl RecordingViewDelegate {
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl ViewDelegate for RecordingViewDelegate {
    fn view(&self, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Scratch working directory with a config file, for driving the CLI.
pub struct TestWorkspace {
    dir: tempfile::TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write `top-projects.toml` with `sh -c` scripts as fetch program and viewer.
    ///
    /// Scripts receive the delegate arguments as `$1..$n`.
    pub fn write_config(&self, fetch_script: &str, viewer_script: &str) -> Result<PathBuf> {
        let config = format!(
            "[fetch]\ncommand = [\"sh\", \"-c\", {}, \"fetch\"]\n\n[viewer]\ncommand = [\"sh\", \"-c\", {}, \"viewer\"]\n",
            toml_string(fetch_script),
            toml_string(viewer_script),
        );
        self.write(crate::io::config::DEFAULT_CONFIG_FILE, &config)
    }
}

fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
