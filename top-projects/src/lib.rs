//! Idempotent task runner for top-starred repository exports.
//!
//! Each configured dataset (an ecosystem plus a star window) gets a fetch
//! task that runs an external fetch program only when its CSV export is
//! missing, and a view task that opens the export in an external viewer.
//!
//! - **[`core`]**: Pure, deterministic types and naming rules. No I/O.
//! - **[`io`]**: Config files and delegated processes. Isolated behind the
//!   [`io::delegate::FetchDelegate`] and [`io::delegate::ViewDelegate`]
//!   traits so tests never spawn the real programs.
//!
//! Orchestration modules ([`export`], [`view`], [`tasks`]) combine the two
//! to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod export;
pub mod io;
pub mod logging;
pub mod tasks;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod view;
