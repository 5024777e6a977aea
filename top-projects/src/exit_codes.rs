//! Stable exit codes for `top-projects` commands.
//!
//! A failing delegate's own exit code is passed through instead of these.

/// Command succeeded, including an export skipped because the file exists.
pub const OK: i32 = 0;
/// Invalid usage, config, or filesystem error, or a view task with no export.
pub const INVALID: i32 = 1;

/// Exit code for a failed command: the delegate's code when one failed.
pub fn for_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<crate::io::delegate::DelegateFailure>()
        .map_or(INVALID, |failure| failure.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::delegate::DelegateFailure;
    use anyhow::{Context, anyhow};

    #[test]
    fn delegate_exit_code_passes_through_context() {
        let err = Err::<(), _>(DelegateFailure::Exited {
            program: "python".to_string(),
            code: 5,
        })
        .context("fetch top-go-projects.csv")
        .unwrap_err();
        assert_eq!(for_error(&err), 5);
    }

    #[test]
    fn other_errors_are_invalid() {
        assert_eq!(for_error(&anyhow!("parse top-projects.toml")), INVALID);
    }
}
