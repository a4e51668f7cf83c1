//! cli
//!
//! Command-line interface layer for Gantry.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT assemble or dispatch invocations directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! the handlers in [`commands`], which load configuration through
//! [`crate::core::config`] and dispatch through [`crate::launcher`].

pub mod args;
pub mod commands;

pub use args::Cli;

use crate::ui::Verbosity;
use anyhow::Result;

/// Execution context derived from global CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit overrides file, if given.
    pub config_path: Option<std::path::PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the process
/// exit code: the child's code when a launch was performed, zero otherwise.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    let ctx = Context {
        config_path: cli.config.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}
