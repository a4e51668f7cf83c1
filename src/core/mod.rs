//! core
//!
//! Domain types for the launcher.
//!
//! # Responsibilities
//!
//! - Strong types for launch mode, precision, and ZeRO stage ([`types`])
//! - Configuration schema, loading, and validation ([`config`])
//! - Deterministic assembly of the training invocation ([`invocation`])
//!
//! The core layer never spawns processes. Dispatch lives in
//! [`crate::launcher`].

pub mod config;
pub mod invocation;
pub mod types;
