//! plan command - Print the assembled invocation

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::invocation::{Invocation, DEFAULT_LAUNCHER_BIN};
use crate::ui::output;

/// Print the invocation `launch` would dispatch.
///
/// Human-readable by default: the program line, then one indented line per
/// argument pair. With `json`, emits the full [`Invocation`] structure.
pub fn plan(ctx: &Context, json: bool) -> Result<()> {
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;
    let invocation = Invocation::assemble(&config.run, DEFAULT_LAUNCHER_BIN);

    if json {
        println!("{}", serde_json::to_string_pretty(&invocation)?);
        return Ok(());
    }

    println!("{}", invocation.command_line());
    if !invocation.env.is_empty() {
        let entries: Vec<String> = invocation
            .env
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        output::print("environment:", ctx.verbosity);
        output::print(output::format_list(&entries, "  "), ctx.verbosity);
    }

    Ok(())
}
