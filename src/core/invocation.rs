//! core::invocation
//!
//! Deterministic assembly of the training invocation.
//!
//! # Design
//!
//! An [`Invocation`] is the single entity the launcher deals in: a program
//! name, an ordered argv, and the environment exported to the child. It is
//! built once from a validated [`TrainConfig`], never mutated afterwards,
//! and consumed exactly once by [`crate::launcher`].
//!
//! # Determinism
//!
//! Flag order is fixed (it mirrors the original launcher script), the env
//! table is sorted, and floats render through one stable formatter, so two
//! assemblies of the same config produce byte-identical argv.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::config::TrainConfig;
use crate::core::types::Precision;

/// Module-style entry point passed to the distributed launcher.
pub const ENTRY_MODULE: &str = "openrlhf.cli.train_rm";

/// Default distributed launcher program.
pub const DEFAULT_LAUNCHER_BIN: &str = "deepspeed";

/// A fully assembled training invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Program to execute (the distributed launcher).
    pub program: PathBuf,

    /// Ordered argument list, starting with `--module <entry>`.
    pub args: Vec<String>,

    /// Environment variables exported to the child, sorted by name.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Assemble the invocation for a run configuration.
    ///
    /// The config is expected to be validated already; assembly itself
    /// cannot fail.
    pub fn assemble(config: &TrainConfig, launcher_bin: &str) -> Self {
        let mut args = vec!["--module".to_string(), ENTRY_MODULE.to_string()];

        push_value(&mut args, "--save_path", config.save_path.display());
        push_value(&mut args, "--save_steps", config.save_steps);
        push_value(&mut args, "--logging_steps", config.logging_steps);
        push_value(&mut args, "--eval_steps", config.eval_steps);
        push_value(&mut args, "--train_batch_size", config.train_batch_size);
        push_value(
            &mut args,
            "--micro_train_batch_size",
            config.micro_train_batch_size,
        );
        push_value(&mut args, "--pretrain", &config.pretrain);
        if config.precision == Precision::Bf16 {
            args.push("--bf16".to_string());
        }
        push_value(&mut args, "--max_epochs", config.max_epochs);
        push_value(&mut args, "--max_len", config.max_len);
        push_value(&mut args, "--zero_stage", config.zero_stage);
        push_value(&mut args, "--learning_rate", fmt_float(config.learning_rate));
        push_value(&mut args, "--l2", fmt_float(config.l2));
        push_value(&mut args, "--dataset", &config.dataset);
        if config.apply_chat_template {
            args.push("--apply_chat_template".to_string());
        }
        push_value(&mut args, "--chosen_key", &config.chosen_key);
        push_value(&mut args, "--rejected_key", &config.rejected_key);
        if config.flash_attn {
            args.push("--flash_attn".to_string());
        }
        if config.load_checkpoint {
            args.push("--load_checkpoint".to_string());
            push_value(&mut args, "--ckpt_path", config.ckpt_path.display());
        }
        if config.gradient_checkpointing {
            args.push("--gradient_checkpointing".to_string());
        }
        if let Some(enable) = &config.wandb.enable {
            push_value(&mut args, "--use_wandb", enable);
            push_value(&mut args, "--wandb_project", &config.wandb.project);
            if let Some(run_name) = &config.wandb.run_name {
                push_value(&mut args, "--wandb_run_name", run_name);
            }
        }

        // BTreeMap iteration is already sorted by key.
        let env = config
            .env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            program: PathBuf::from(launcher_bin),
            args,
            env,
        }
    }

    /// Render the invocation as a single display line.
    ///
    /// For human consumption (dry runs, `plan`); this is not shell-quoted.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Push a `--flag value` pair.
fn push_value(args: &mut Vec<String>, flag: &str, value: impl std::fmt::Display) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

/// Format a float the way the original launcher wrote it.
///
/// Small magnitudes use scientific notation (`9e-6` stays `9e-6`), which
/// both reads like the source script and round-trips through the external
/// tool's float parsing. Larger values use plain decimal display.
fn fmt_float(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-3 {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{TrainConfig, WandbConfig};
    use crate::core::types::Precision;

    fn default_invocation() -> Invocation {
        Invocation::assemble(&TrainConfig::default(), DEFAULT_LAUNCHER_BIN)
    }

    /// Find the value following a flag in the argv.
    fn value_of<'a>(inv: &'a Invocation, flag: &str) -> Option<&'a str> {
        let idx = inv.args.iter().position(|a| a == flag)?;
        inv.args.get(idx + 1).map(String::as_str)
    }

    #[test]
    fn entry_module_comes_first() {
        let inv = default_invocation();
        assert_eq!(inv.args[0], "--module");
        assert_eq!(inv.args[1], ENTRY_MODULE);
        assert_eq!(inv.program, PathBuf::from("deepspeed"));
    }

    #[test]
    fn fixed_run_literals() {
        let inv = default_invocation();
        assert_eq!(
            value_of(&inv, "--pretrain"),
            Some("meta-llama/Llama-3.2-3B-Instruct")
        );
        assert_eq!(value_of(&inv, "--zero_stage"), Some("3"));
        assert_eq!(value_of(&inv, "--train_batch_size"), Some("256"));
        assert_eq!(value_of(&inv, "--micro_train_batch_size"), Some("1"));
        assert_eq!(value_of(&inv, "--max_len"), Some("8192"));
        assert_eq!(value_of(&inv, "--learning_rate"), Some("9e-6"));
        assert_eq!(value_of(&inv, "--save_steps"), Some("-1"));
        assert_eq!(value_of(&inv, "--chosen_key"), Some("chosen"));
        assert_eq!(value_of(&inv, "--rejected_key"), Some("rejected"));
        assert_eq!(value_of(&inv, "--use_wandb"), Some("True"));
        assert_eq!(value_of(&inv, "--wandb_project"), Some("llama32-rm"));
    }

    #[test]
    fn boolean_flags_present_by_default() {
        let inv = default_invocation();
        for flag in [
            "--bf16",
            "--apply_chat_template",
            "--flash_attn",
            "--load_checkpoint",
            "--gradient_checkpointing",
        ] {
            assert!(inv.args.iter().any(|a| a == flag), "missing {}", flag);
        }
    }

    #[test]
    fn boolean_flags_absent_when_disabled() {
        let config = TrainConfig {
            precision: Precision::Fp32,
            apply_chat_template: false,
            flash_attn: false,
            load_checkpoint: false,
            gradient_checkpointing: false,
            ..Default::default()
        };
        let inv = Invocation::assemble(&config, DEFAULT_LAUNCHER_BIN);
        for flag in [
            "--bf16",
            "--apply_chat_template",
            "--flash_attn",
            "--load_checkpoint",
            "--ckpt_path",
            "--gradient_checkpointing",
        ] {
            assert!(!inv.args.iter().any(|a| a == flag), "unexpected {}", flag);
        }
    }

    #[test]
    fn wandb_disabled_drops_tracking_flags() {
        let config = TrainConfig {
            wandb: WandbConfig {
                enable: None,
                ..Default::default()
            },
            ..Default::default()
        };
        let inv = Invocation::assemble(&config, DEFAULT_LAUNCHER_BIN);
        assert!(!inv.args.iter().any(|a| a == "--use_wandb"));
        assert!(!inv.args.iter().any(|a| a == "--wandb_project"));
    }

    #[test]
    fn run_name_only_when_configured() {
        let inv = default_invocation();
        assert!(!inv.args.iter().any(|a| a == "--wandb_run_name"));

        let config = TrainConfig {
            wandb: WandbConfig {
                run_name: Some("rm-baseline".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let inv = Invocation::assemble(&config, DEFAULT_LAUNCHER_BIN);
        assert_eq!(value_of(&inv, "--wandb_run_name"), Some("rm-baseline"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let config = TrainConfig::default();
        let first = Invocation::assemble(&config, DEFAULT_LAUNCHER_BIN);
        let second = Invocation::assemble(&config, DEFAULT_LAUNCHER_BIN);
        assert_eq!(first, second);
        assert_eq!(first.command_line(), second.command_line());
    }

    #[test]
    fn env_is_sorted() {
        let mut config = TrainConfig::default();
        config.env.insert("ZZZ".to_string(), "1".to_string());
        config.env.insert("AAA".to_string(), "2".to_string());
        let inv = Invocation::assemble(&config, DEFAULT_LAUNCHER_BIN);
        assert_eq!(inv.env[0].0, "AAA");
        assert_eq!(inv.env[1].0, "ZZZ");
    }

    mod fmt_float {
        use super::super::fmt_float;

        #[test]
        fn small_magnitudes_use_scientific() {
            assert_eq!(fmt_float(9e-6), "9e-6");
            assert_eq!(fmt_float(1e-4), "1e-4");
        }

        #[test]
        fn zero_and_plain_values_use_decimal() {
            assert_eq!(fmt_float(0.0), "0");
            assert_eq!(fmt_float(0.1), "0.1");
            assert_eq!(fmt_float(1.0), "1");
        }
    }
}
