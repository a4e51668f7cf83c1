//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! The launch configuration starts from built-in defaults (the fixed
//! reward-model run) and is refined by TOML overrides files.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults ([`TrainConfig::default`])
//! 2. Discovered overrides file (see below)
//! 3. Explicit `--config <path>` file
//!
//! # Discovered Config Locations
//!
//! Searched in order, first hit wins:
//! 1. `$GANTRY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gantry/config.toml`
//! 3. `~/.gantry/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use gantry::core::config::Config;
//! use std::path::Path;
//!
//! // Load the effective run configuration
//! let config = Config::load(Some(Path::new("run.toml"))).unwrap();
//!
//! println!("Base model: {}", config.run.pretrain);
//! println!("ZeRO stage: {}", config.run.zero_stage);
//! ```

pub mod schema;

pub use schema::{RunOverrides, TrainConfig, WandbConfig, WandbOverrides};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The effective run configuration.
    pub run: TrainConfig,
    /// Overrides files that were applied, in application order.
    sources: Vec<PathBuf>,
}

impl Config {
    /// Load configuration, optionally layering an explicit overrides file.
    ///
    /// The discovered config (if any) is applied first, then the explicit
    /// file on top. An explicit path must exist; a missing discovered
    /// config is not an error (defaults are used).
    ///
    /// # Errors
    ///
    /// Returns an error if an overrides file cannot be read or parsed, or
    /// if the merged configuration fails validation.
    pub fn load(explicit_path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut run = TrainConfig::default();
        let mut sources = Vec::new();

        if let Some(path) = Self::discover() {
            run.apply(Self::read_overrides(&path)?);
            sources.push(path);
        }

        if let Some(path) = explicit_path {
            run.apply(Self::read_overrides(path)?);
            sources.push(path.to_path_buf());
        }

        run.validate()?;

        Ok(Config { run, sources })
    }

    /// Find an overrides file in the standard locations.
    fn discover() -> Option<PathBuf> {
        let env_config = std::env::var("GANTRY_CONFIG").ok();
        let xdg_config_home = std::env::var("XDG_CONFIG_HOME").ok();
        Self::discover_from(
            env_config.as_deref(),
            xdg_config_home.as_deref(),
            dirs::home_dir(),
        )
    }

    /// Discovery with the environment passed in, so it is testable without
    /// mutating process-global state.
    fn discover_from(
        env_config: Option<&str>,
        xdg_config_home: Option<&str>,
        home: Option<PathBuf>,
    ) -> Option<PathBuf> {
        // 1. Check $GANTRY_CONFIG
        if let Some(path) = env_config {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/gantry/config.toml
        if let Some(xdg_home) = xdg_config_home {
            let path = PathBuf::from(xdg_home).join("gantry/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.gantry/config.toml
        if let Some(home) = home {
            let path = home.join(".gantry/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse an overrides file.
    fn read_overrides(path: &Path) -> Result<RunOverrides, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for the discovered config file.
    ///
    /// Returns `~/.gantry/config.toml`, or `None` when the home directory
    /// cannot be determined.
    pub fn canonical_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".gantry/config.toml"))
    }

    /// Get the overrides files that were applied, in application order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}
