//! I/O helpers for task runner commands.

pub mod config;
pub mod delegate;
pub mod process;
