//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this overrides file instead of the discovered one
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::core::invocation::DEFAULT_LAUNCHER_BIN;

/// Gantry - A typed launcher for distributed reward-model training runs
#[derive(Parser, Debug)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Apply run overrides from this file, on top of any discovered config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the training invocation and dispatch it
    #[command(
        name = "launch",
        long_about = "Assemble the training invocation and dispatch it.\n\n\
            Builds the full flag list for the reward-model training entry point \
            from the effective configuration, then runs it through the \
            distributed launcher. Gantry blocks until the child exits and \
            propagates its exit code verbatim.\n\n\
            With the positional mode 'slurm', nothing is executed locally: the \
            cluster's workload scheduler owns the dispatch and gantry exits 0.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Run the fixed reward-model training run locally
    gantry launch

    # Inside an sbatch script: let slurm do the dispatch
    gantry launch slurm

    # Preview the exact command without spawning anything
    gantry launch --dry-run

    # Tweak the run via an overrides file
    gantry launch --config run.toml

HANDLING FAILURES:
    Gantry performs no retries and interprets no output. A missing launcher
    binary, a bad flag, or an out-of-memory abort all surface as the child's
    own error output and exit code."
    )]
    Launch {
        /// Dispatch mode; 'slurm' defers to the cluster scheduler, anything
        /// else (or nothing) runs locally
        mode: Option<String>,

        /// Distributed launcher program to invoke
        #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_LAUNCHER_BIN)]
        launcher_bin: String,

        /// Print the invocation without spawning anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the assembled invocation
    #[command(
        name = "plan",
        long_about = "Print the invocation that 'gantry launch' would dispatch.\n\n\
            Useful for code review of run changes and for scripting: the output \
            is deterministic for a given configuration.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Human-readable flag list
    gantry plan

    # Machine-readable, for tooling
    gantry plan --json

    # What would an overrides file change?
    diff <(gantry plan) <(gantry plan --config run.toml)"
    )]
    Plan {
        /// Emit the invocation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration
    #[command(
        name = "config",
        long_about = "Inspect the effective run configuration.\n\n\
            Shows the merged result of built-in defaults and any overrides \
            file, or the location overrides are read from.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Effective configuration as TOML
    gantry config show

    # Where is the discovered config read from?
    gantry config path"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for Gantry commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    gantry completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    gantry completion zsh >> ~/.zshrc

    # Fish
    gantry completion fish > ~/.config/fish/completions/gantry.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration as TOML
    Show,
    /// Show where overrides files are read from
    Path,
}
