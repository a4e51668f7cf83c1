//! launch command - Assemble the training invocation and dispatch it

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::invocation::Invocation;
use crate::core::types::LaunchMode;
use crate::launcher::Launcher;
use crate::ui::output;

/// Assemble and dispatch one training invocation.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `mode` - Optional positional mode; `"slurm"` defers to the cluster
/// * `launcher_bin` - Distributed launcher program to invoke
/// * `dry_run` - Print the invocation instead of spawning
/// * `launcher` - Dispatch capability (real or fake)
///
/// Returns the exit code for the gantry process: the child's code for a
/// local run, 0 for dry runs and cluster-managed mode.
pub fn launch(
    ctx: &Context,
    mode: Option<&str>,
    launcher_bin: &str,
    dry_run: bool,
    launcher: &dyn Launcher,
) -> Result<i32> {
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;

    for path in config.sources() {
        output::debug(format!("overrides applied from {}", path.display()), ctx.verbosity);
    }

    let invocation = Invocation::assemble(&config.run, launcher_bin);

    if dry_run {
        println!("{}", invocation.command_line());
        return Ok(0);
    }

    match LaunchMode::from_arg(mode) {
        LaunchMode::ClusterManaged => {
            // The workload scheduler owns the dispatch; spawning here would
            // start a second, unmanaged copy of the job.
            output::print(
                "cluster-managed mode: dispatch is deferred to the workload scheduler",
                ctx.verbosity,
            );
            Ok(0)
        }
        LaunchMode::Local => {
            output::debug(invocation.command_line(), ctx.verbosity);
            let code = launcher.launch(&invocation)?;
            if code != 0 {
                output::warn(
                    format!("training process exited with code {}", code),
                    ctx.verbosity,
                );
            }
            Ok(code)
        }
    }
}
