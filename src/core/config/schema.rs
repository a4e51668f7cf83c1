//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Run Config
//!
//! [`TrainConfig`] is the structured record behind the training invocation.
//! Its defaults reproduce the fixed reward-model run the original launcher
//! hardcoded; a [`RunOverrides`] file can override individual fields.
//!
//! # Validation
//!
//! Config values are validated after merging to ensure they conform to
//! expected shapes (non-empty identifiers, positive batch sizes, a finite
//! learning rate). Validation catches mistakes before a multi-node job is
//! ever scheduled.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{Precision, ZeroStage};

/// Structured configuration for one reward-model training run.
///
/// Every field maps to exactly one flag of the external training entry
/// point. The semantics of those flags belong to the external framework;
/// gantry only guarantees they are well-typed and rendered deterministically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainConfig {
    /// Directory the trained model is saved to.
    pub save_path: PathBuf,

    /// Directory checkpoints are read from when resuming.
    pub ckpt_path: PathBuf,

    /// Checkpoint interval in steps (-1 disables step-based saving).
    pub save_steps: i64,

    /// Logging interval in steps.
    pub logging_steps: i64,

    /// Evaluation interval in steps (-1 disables step-based eval).
    pub eval_steps: i64,

    /// Global training batch size.
    pub train_batch_size: u32,

    /// Per-device micro batch size.
    pub micro_train_batch_size: u32,

    /// Base model identifier (hub id or local path).
    pub pretrain: String,

    /// Numeric precision mode.
    pub precision: Precision,

    /// Number of training epochs.
    pub max_epochs: u32,

    /// Maximum sequence length in tokens.
    pub max_len: u32,

    /// ZeRO memory-partitioning stage.
    pub zero_stage: ZeroStage,

    /// Peak learning rate.
    pub learning_rate: f64,

    /// L2 regularization coefficient.
    pub l2: f64,

    /// Preference dataset identifier.
    pub dataset: String,

    /// Apply the tokenizer's chat template to samples.
    pub apply_chat_template: bool,

    /// Dataset field holding the preferred response.
    pub chosen_key: String,

    /// Dataset field holding the rejected response.
    pub rejected_key: String,

    /// Use the flash-attention kernel.
    pub flash_attn: bool,

    /// Resume from the checkpoint directory if one exists.
    pub load_checkpoint: bool,

    /// Trade compute for memory with gradient checkpointing.
    pub gradient_checkpointing: bool,

    /// Experiment-tracking settings.
    pub wandb: WandbConfig,

    /// Environment variables exported to the child process.
    pub env: BTreeMap<String, String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("./checkpoint/llama3.2-3b-rm"),
            ckpt_path: PathBuf::from("./checkpoint/llama3.2-3b-rm/ckpt"),
            save_steps: -1,
            logging_steps: 1,
            eval_steps: -1,
            train_batch_size: 256,
            micro_train_batch_size: 1,
            pretrain: "meta-llama/Llama-3.2-3B-Instruct".to_string(),
            precision: Precision::Bf16,
            max_epochs: 1,
            max_len: 8192,
            // Stage 3 shards parameters as well; needed to fit 3B+ models
            // in single-node device memory.
            zero_stage: ZeroStage::new(3).expect("stage 3 is valid"),
            learning_rate: 9e-6,
            l2: 0.0,
            dataset: "OpenRLHF/preference_dataset_mixture2_and_safe_pythia".to_string(),
            apply_chat_template: true,
            chosen_key: "chosen".to_string(),
            rejected_key: "rejected".to_string(),
            flash_attn: true,
            load_checkpoint: true,
            gradient_checkpointing: true,
            wandb: WandbConfig::default(),
            env: BTreeMap::new(),
        }
    }
}

impl TrainConfig {
    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pretrain.is_empty() {
            return Err(ConfigError::InvalidValue(
                "pretrain model id cannot be empty".to_string(),
            ));
        }
        if self.dataset.is_empty() {
            return Err(ConfigError::InvalidValue(
                "dataset id cannot be empty".to_string(),
            ));
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "save_path cannot be empty".to_string(),
            ));
        }
        if self.chosen_key.is_empty() || self.rejected_key.is_empty() {
            return Err(ConfigError::InvalidValue(
                "chosen_key and rejected_key cannot be empty".to_string(),
            ));
        }
        if self.train_batch_size == 0 || self.micro_train_batch_size == 0 {
            return Err(ConfigError::InvalidValue(
                "batch sizes must be positive".to_string(),
            ));
        }
        if self.micro_train_batch_size > self.train_batch_size {
            return Err(ConfigError::InvalidValue(format!(
                "micro batch size {} exceeds global batch size {}",
                self.micro_train_batch_size, self.train_batch_size
            )));
        }
        if self.max_epochs == 0 {
            return Err(ConfigError::InvalidValue(
                "max_epochs must be positive".to_string(),
            ));
        }
        if self.max_len == 0 {
            return Err(ConfigError::InvalidValue(
                "max_len must be positive".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if !self.l2.is_finite() || self.l2 < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "l2 must be finite and non-negative, got {}",
                self.l2
            )));
        }
        self.wandb.validate()?;
        for key in self.env.keys() {
            if key.is_empty() || key.contains('=') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid environment variable name '{}'",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Apply a set of file overrides on top of this configuration.
    pub fn apply(&mut self, overrides: RunOverrides) {
        if let Some(v) = overrides.save_path {
            self.save_path = v;
        }
        if let Some(v) = overrides.ckpt_path {
            self.ckpt_path = v;
        }
        if let Some(v) = overrides.save_steps {
            self.save_steps = v;
        }
        if let Some(v) = overrides.logging_steps {
            self.logging_steps = v;
        }
        if let Some(v) = overrides.eval_steps {
            self.eval_steps = v;
        }
        if let Some(v) = overrides.train_batch_size {
            self.train_batch_size = v;
        }
        if let Some(v) = overrides.micro_train_batch_size {
            self.micro_train_batch_size = v;
        }
        if let Some(v) = overrides.pretrain {
            self.pretrain = v;
        }
        if let Some(v) = overrides.precision {
            self.precision = v;
        }
        if let Some(v) = overrides.max_epochs {
            self.max_epochs = v;
        }
        if let Some(v) = overrides.max_len {
            self.max_len = v;
        }
        if let Some(v) = overrides.zero_stage {
            self.zero_stage = v;
        }
        if let Some(v) = overrides.learning_rate {
            self.learning_rate = v;
        }
        if let Some(v) = overrides.l2 {
            self.l2 = v;
        }
        if let Some(v) = overrides.dataset {
            self.dataset = v;
        }
        if let Some(v) = overrides.apply_chat_template {
            self.apply_chat_template = v;
        }
        if let Some(v) = overrides.chosen_key {
            self.chosen_key = v;
        }
        if let Some(v) = overrides.rejected_key {
            self.rejected_key = v;
        }
        if let Some(v) = overrides.flash_attn {
            self.flash_attn = v;
        }
        if let Some(v) = overrides.load_checkpoint {
            self.load_checkpoint = v;
        }
        if let Some(v) = overrides.gradient_checkpointing {
            self.gradient_checkpointing = v;
        }
        if let Some(v) = overrides.wandb {
            self.wandb.apply(v);
        }
        // Env overrides merge per-key rather than replacing the table.
        if let Some(env) = overrides.env {
            self.env.extend(env);
        }
    }
}

/// Experiment-tracking (wandb) settings.
///
/// `enable` is the value passed to the external tool's `--use_wandb` flag.
/// The tool accepts either an enablement literal or an authentication token;
/// the full grammar is owned by the tool, so the value is kept free-form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WandbConfig {
    /// Value for the tracking enablement flag; `None` disables tracking.
    pub enable: Option<String>,

    /// Tracking project name.
    pub project: String,

    /// Run name; when absent the external tool picks its own.
    pub run_name: Option<String>,
}

impl Default for WandbConfig {
    fn default() -> Self {
        Self {
            enable: Some("True".to_string()),
            project: "llama32-rm".to_string(),
            run_name: None,
        }
    }
}

impl WandbConfig {
    /// Validate tracking settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(enable) = &self.enable {
            if enable.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "wandb.enable cannot be an empty string".to_string(),
                ));
            }
            if self.project.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "wandb.project cannot be empty when tracking is enabled".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn apply(&mut self, overrides: WandbOverrides) {
        if overrides.disabled == Some(true) {
            self.enable = None;
        } else if let Some(v) = overrides.value {
            self.enable = Some(v);
        }
        if let Some(v) = overrides.project {
            self.project = v;
        }
        if let Some(v) = overrides.run_name {
            self.run_name = Some(v);
        }
    }
}

/// Partial run configuration loaded from a TOML file.
///
/// Every field is optional; present fields override the defaults in
/// [`TrainConfig`]. Unknown fields are rejected so typos fail loudly
/// instead of silently launching the default run.
///
/// # Example
///
/// ```toml
/// pretrain = "meta-llama/Llama-3.2-3B-Instruct"
/// max_epochs = 2
/// zero_stage = 2
///
/// [wandb]
/// project = "rm-sweeps"
///
/// [env]
/// NCCL_DEBUG = "WARN"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunOverrides {
    pub save_path: Option<PathBuf>,
    pub ckpt_path: Option<PathBuf>,
    pub save_steps: Option<i64>,
    pub logging_steps: Option<i64>,
    pub eval_steps: Option<i64>,
    pub train_batch_size: Option<u32>,
    pub micro_train_batch_size: Option<u32>,
    pub pretrain: Option<String>,
    pub precision: Option<Precision>,
    pub max_epochs: Option<u32>,
    pub max_len: Option<u32>,
    pub zero_stage: Option<ZeroStage>,
    pub learning_rate: Option<f64>,
    pub l2: Option<f64>,
    pub dataset: Option<String>,
    pub apply_chat_template: Option<bool>,
    pub chosen_key: Option<String>,
    pub rejected_key: Option<String>,
    pub flash_attn: Option<bool>,
    pub load_checkpoint: Option<bool>,
    pub gradient_checkpointing: Option<bool>,
    pub wandb: Option<WandbOverrides>,
    pub env: Option<BTreeMap<String, String>>,
}

/// Partial wandb settings from a TOML file.
///
/// TOML cannot express "set to nothing", so disabling tracking has its own
/// switch instead of a nullable `value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WandbOverrides {
    /// `disabled = true` turns tracking off entirely; `value` is then ignored.
    pub disabled: Option<bool>,

    /// Value for the enablement flag (literal or auth token).
    pub value: Option<String>,

    pub project: Option<String>,
    pub run_name: Option<String>,
}
