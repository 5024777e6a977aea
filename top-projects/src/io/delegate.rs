//! Delegate abstraction for the external fetch program and CSV viewer.
//!
//! [`FetchDelegate`] and [`ViewDelegate`] decouple task orchestration from
//! the concrete programs. Tests use recording delegates that never spawn a
//! process.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::core::types::DatasetRequest;
use crate::exit_codes;
use crate::io::config::{FetchConfig, ViewerConfig};
use crate::io::process::{Completion, build_command, run_inherited};

/// A delegated program did not finish successfully.
///
/// Carried through `anyhow` so the CLI can pass the child's exit code on.
#[derive(Debug, Error)]
pub enum DelegateFailure {
    #[error("{program} exited with status {code}")]
    Exited { program: String, code: i32 },
    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
    #[error("{program} timed out after {timeout_secs}s")]
    TimedOut { program: String, timeout_secs: u64 },
}

impl DelegateFailure {
    /// Process exit code the CLI should report for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            DelegateFailure::Exited { code, .. } => *code,
            DelegateFailure::Terminated { .. } | DelegateFailure::TimedOut { .. } => {
                exit_codes::INVALID
            }
        }
    }
}

/// Produces the export file for a dataset request.
pub trait FetchDelegate {
    /// Run the fetch. Must not return `Ok` unless the program succeeded.
    fn fetch(&self, request: &DatasetRequest) -> Result<()>;
}

/// Opens an export file for interactive viewing.
pub trait ViewDelegate {
    fn view(&self, path: &Path) -> Result<()>;
}

/// Fetch delegate that spawns the configured program (`python main.py` by default).
pub struct ProcessFetchDelegate {
    command: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessFetchDelegate {
    pub fn new(command: Vec<String>, timeout: Option<Duration>) -> Self {
        Self { command, timeout }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(config.command.clone(), config.timeout())
    }
}

/// Arguments for the fetch program, in the order it documents them.
pub fn fetch_args(request: &DatasetRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--language".into(),
        request.ecosystem.clone().into(),
        "--min-stars".into(),
        request.min_stars.to_string().into(),
        "--max-stars".into(),
        request.max_stars.to_string().into(),
        "--output".into(),
        request.output.clone().into_os_string(),
    ];
    if let Some(min_forks) = request.min_forks {
        args.push("--min-forks".into());
        args.push(min_forks.to_string().into());
    }
    args
}

impl FetchDelegate for ProcessFetchDelegate {
    #[instrument(skip_all, fields(ecosystem = %request.ecosystem, output = %request.output.display()))]
    fn fetch(&self, request: &DatasetRequest) -> Result<()> {
        info!(
            min_stars = request.min_stars,
            max_stars = request.max_stars,
            "starting fetch program"
        );
        let cmd = build_command(&self.command, &fetch_args(request))?;
        let completion = run_inherited(cmd, self.timeout).context("run fetch program")?;
        check_completion(&self.command[0], &completion, self.timeout)?;
        Ok(())
    }
}

/// View delegate that spawns the configured viewer (`csvlens` by default).
pub struct ProcessViewDelegate {
    command: Vec<String>,
}

impl ProcessViewDelegate {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.command.clone())
    }
}

impl ViewDelegate for ProcessViewDelegate {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn view(&self, path: &Path) -> Result<()> {
        info!("starting viewer");
        let cmd = build_command(&self.command, &[path.as_os_str().to_os_string()])?;
        let completion = run_inherited(cmd, None).context("run viewer")?;
        check_completion(&self.command[0], &completion, None)?;
        Ok(())
    }
}

fn check_completion(
    program: &str,
    completion: &Completion,
    timeout: Option<Duration>,
) -> std::result::Result<(), DelegateFailure> {
    let program = program.to_string();
    if completion.timed_out {
        let timeout_secs = timeout.map(|t| t.as_secs()).unwrap_or_default();
        warn!(%program, timeout_secs, "delegate timed out");
        return Err(DelegateFailure::TimedOut {
            program,
            timeout_secs,
        });
    }
    if completion.status.success() {
        return Ok(());
    }
    warn!(%program, exit_code = ?completion.status.code(), "delegate failed");
    match completion.status.code() {
        Some(code) => Err(DelegateFailure::Exited { program, code }),
        None => Err(DelegateFailure::Terminated { program }),
    }
}
