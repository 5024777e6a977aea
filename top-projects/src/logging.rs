//! Diagnostics for the task runner.
//!
//! Tracing output goes to stderr and is off below `warn` unless asked for
//! with `-v`/`-vv` or `RUST_LOG`. Operator notices ("already exists", missing
//! exports) are printed by the CLI on their own and never depend on this.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for a `-v` count when `RUST_LOG` is unset.
///
/// Verbosity only raises this crate's level; dependencies stay at `warn`.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,top_projects=info",
        _ => "warn,top_projects=debug",
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides `verbosity`.
///
/// # Example
/// ```bash
/// top-projects -v run top-go
/// RUST_LOG=top_projects::io=debug top-projects run go-view
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1)
                .compact(),
        )
        .init();
}
