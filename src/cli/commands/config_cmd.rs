//! config command - Inspect the effective configuration

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;

/// Show the effective configuration as TOML.
pub fn show(ctx: &Context) -> Result<()> {
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;

    let rendered =
        toml::to_string_pretty(&config.run).context("Failed to render configuration")?;
    print!("{}", rendered);

    Ok(())
}

/// Show where overrides files are read from, in application order.
pub fn path(ctx: &Context) -> Result<()> {
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;

    if config.sources().is_empty() {
        match Config::canonical_config_path() {
            Some(canonical) => println!("{} (not present, using defaults)", canonical.display()),
            None => println!("(no config file, using defaults)"),
        }
    } else {
        for path in config.sources() {
            println!("{}", path.display());
        }
    }

    Ok(())
}
