//! launcher
//!
//! Capability interface for dispatching a training invocation.
//!
//! # Design
//!
//! The launcher is "something invokable with an assembled invocation,
//! returning an exit status". Command handlers depend on the [`Launcher`]
//! trait, not on [`DeepspeedLauncher`], so they can be unit-tested against
//! a recording fake without spawning real processes.
//!
//! # Contract
//!
//! - Fire-and-forget: no retries, no output parsing, no partial-failure
//!   handling. Any failure inside the child surfaces as its exit code.
//! - The call blocks until the child completes or is interrupted; signal
//!   propagation is the operating environment's concern.

mod deepspeed;

pub use deepspeed::DeepspeedLauncher;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::invocation::Invocation;

/// Errors from dispatching an invocation.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The launcher program could not be started at all.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    /// The child was terminated by a signal and carries no exit code.
    #[error("'{program}' was terminated by a signal before exiting")]
    Terminated { program: PathBuf },
}

/// Something that can dispatch an assembled invocation.
pub trait Launcher {
    /// Run the invocation to completion and return the child's exit code.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::Spawn` when the launcher program cannot be
    /// started (e.g. not installed), and `LaunchError::Terminated` when the
    /// child died to a signal and has no exit code to propagate.
    fn launch(&self, invocation: &Invocation) -> Result<i32, LaunchError>;
}
