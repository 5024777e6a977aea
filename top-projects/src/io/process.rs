//! Helpers for running delegated programs attached to the operator's terminal.

use std::ffi::OsString;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// How a delegated program finished.
#[derive(Debug)]
pub struct Completion {
    pub status: ExitStatus,
    pub timed_out: bool,
}

/// Build a `Command` from a configured argv prefix plus extra arguments.
pub fn build_command(argv: &[String], extra: &[OsString]) -> Result<Command> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("command must be non-empty"))?;
    let mut cmd = Command::new(program);
    cmd.args(args).args(extra);
    Ok(cmd)
}

/// Run a command with inherited stdio, optionally killing it after `timeout`.
///
/// Output is not captured: the fetch program reports progress and the viewer
/// draws its UI directly on the terminal.
#[instrument(skip_all, fields(program = ?cmd.get_program(), timeout_secs = timeout.map(|t| t.as_secs())))]
pub fn run_inherited(mut cmd: Command, timeout: Option<Duration>) -> Result<Completion> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).with_context(|| format!("spawn {:?}", cmd.get_program()));
        }
    };

    let Some(timeout) = timeout else {
        let status = child.wait().context("wait for command")?;
        debug!(exit_code = ?status.code(), "command finished");
        return Ok(Completion {
            status,
            timed_out: false,
        });
    };

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => status,
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            timed_out = true;
            child.kill().context("kill command")?;
            child.wait().context("wait command after kill")?
        }
    };

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(Completion { status, timed_out })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let argv = vec!["sh".to_string(), "-c".to_string(), script.to_string()];
        build_command(&argv, &[]).expect("command")
    }

    #[test]
    fn build_command_appends_extra_args() {
        let argv = vec!["python".to_string(), "main.py".to_string()];
        let cmd = build_command(&argv, &[OsString::from("--language"), OsString::from("go")])
            .expect("command");
        assert_eq!(cmd.get_program(), "python");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["main.py", "--language", "go"]);
    }

    #[test]
    fn build_command_rejects_empty_argv() {
        assert!(build_command(&[], &[]).is_err());
    }

    #[test]
    fn reports_exit_status() {
        let completion = run_inherited(sh("exit 3"), None).expect("run");
        assert_eq!(completion.status.code(), Some(3));
        assert!(!completion.timed_out);
    }

    #[test]
    fn kills_on_timeout() {
        let completion =
            run_inherited(sh("sleep 5"), Some(Duration::from_millis(100))).expect("run");
        assert!(completion.timed_out);
        assert!(!completion.status.success());
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let argv = vec!["definitely-not-a-real-program-xyz".to_string()];
        let cmd = build_command(&argv, &[]).expect("command");
        let err = run_inherited(cmd, None).unwrap_err();
        assert!(format!("{err:#}").contains("spawn"));
    }
}
