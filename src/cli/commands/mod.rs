//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the effective configuration
//! 2. Assembles or inspects the invocation
//! 3. Formats and displays output
//!
//! Handlers return the process exit code. Only `launch` in local mode can
//! return anything other than 0 on the success path: it relays the child's
//! exit code verbatim.

mod completion;
mod config_cmd;
mod launch;
mod plan;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{path as config_path, show as config_show};
pub use launch::launch;
pub use plan::plan;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::launcher::DeepspeedLauncher;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<i32> {
    match command {
        Command::Launch {
            mode,
            launcher_bin,
            dry_run,
        } => launch(
            ctx,
            mode.as_deref(),
            &launcher_bin,
            dry_run,
            &DeepspeedLauncher,
        ),
        Command::Plan { json } => plan(ctx, json).map(|()| 0),
        Command::Config { action } => match action {
            ConfigAction::Show => config_show(ctx).map(|()| 0),
            ConfigAction::Path => config_path(ctx).map(|()| 0),
        },
        Command::Completion { shell } => completion(shell).map(|()| 0),
    }
}
