//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`LaunchMode`] - How the training invocation is dispatched
//! - [`Precision`] - Numeric precision mode for training
//! - [`ZeroStage`] - Validated ZeRO memory-partitioning stage
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use gantry::core::types::{LaunchMode, ZeroStage};
//!
//! assert_eq!(LaunchMode::from_arg(Some("slurm")), LaunchMode::ClusterManaged);
//! assert_eq!(LaunchMode::from_arg(None), LaunchMode::Local);
//!
//! let stage = ZeroStage::new(3).unwrap();
//! assert_eq!(stage.as_u8(), 3);
//! assert!(ZeroStage::new(4).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid ZeRO stage {0}: must be 0, 1, 2, or 3")]
    InvalidZeroStage(u8),
}

/// How a training invocation is dispatched.
///
/// Replaces the original launcher's string comparison with an exhaustive
/// enum. `ClusterManaged` means an external workload scheduler performs the
/// actual dispatch; gantry assembles nothing beyond the plan and exits 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Run the invocation locally through the distributed launcher.
    Local,
    /// Defer dispatch to an external cluster scheduler (e.g. slurm).
    ClusterManaged,
}

impl LaunchMode {
    /// Resolve the mode from the optional positional argument.
    ///
    /// Only the literal `"slurm"` selects cluster-managed dispatch. Any
    /// other value, or no value at all, runs locally. Unknown strings are
    /// deliberately not an error: the original launcher treated everything
    /// except `slurm` as a local run.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("slurm") => LaunchMode::ClusterManaged,
            _ => LaunchMode::Local,
        }
    }
}

/// Numeric precision mode for training.
///
/// `Bf16` renders the `--bf16` flag; `Fp32` renders nothing (full precision
/// is the external trainer's default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Bf16,
    Fp32,
}

/// A validated ZeRO memory-partitioning stage.
///
/// The external framework shards optimizer, gradient, and parameter state
/// progressively across stages 0 through 3. Values outside that range are
/// rejected at construction.
///
/// # Example
///
/// ```
/// use gantry::core::types::ZeroStage;
///
/// let stage = ZeroStage::new(2).unwrap();
/// assert_eq!(stage.to_string(), "2");
/// assert!(ZeroStage::new(7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZeroStage(u8);

impl ZeroStage {
    /// Create a new validated stage.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidZeroStage` for values above 3.
    pub fn new(stage: u8) -> Result<Self, TypeError> {
        if stage > 3 {
            return Err(TypeError::InvalidZeroStage(stage));
        }
        Ok(Self(stage))
    }

    /// Get the stage as a plain integer.
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ZeroStage {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZeroStage> for u8 {
    fn from(stage: ZeroStage) -> Self {
        stage.0
    }
}

impl std::fmt::Display for ZeroStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod launch_mode {
        use super::*;

        #[test]
        fn slurm_is_cluster_managed() {
            assert_eq!(
                LaunchMode::from_arg(Some("slurm")),
                LaunchMode::ClusterManaged
            );
        }

        #[test]
        fn absent_is_local() {
            assert_eq!(LaunchMode::from_arg(None), LaunchMode::Local);
        }

        #[test]
        fn unknown_values_are_local() {
            assert_eq!(LaunchMode::from_arg(Some("local")), LaunchMode::Local);
            assert_eq!(LaunchMode::from_arg(Some("SLURM")), LaunchMode::Local);
            assert_eq!(LaunchMode::from_arg(Some("")), LaunchMode::Local);
        }
    }

    mod zero_stage {
        use super::*;

        #[test]
        fn valid_stages() {
            for s in 0..=3 {
                assert_eq!(ZeroStage::new(s).unwrap().as_u8(), s);
            }
        }

        #[test]
        fn invalid_stage_rejected() {
            assert_eq!(ZeroStage::new(4), Err(TypeError::InvalidZeroStage(4)));
        }

        #[test]
        fn serde_roundtrip() {
            let stage = ZeroStage::new(3).unwrap();
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, "3");
            let parsed: ZeroStage = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, stage);
        }

        #[test]
        fn serde_rejects_out_of_range() {
            let result: Result<ZeroStage, _> = serde_json::from_str("9");
            assert!(result.is_err());
        }
    }

    mod precision {
        use super::*;

        #[test]
        fn serde_lowercase() {
            let p: Precision = serde_json::from_str("\"bf16\"").unwrap();
            assert_eq!(p, Precision::Bf16);
            let p: Precision = serde_json::from_str("\"fp32\"").unwrap();
            assert_eq!(p, Precision::Fp32);
        }
    }
}
