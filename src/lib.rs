//! Gantry - A typed launcher for distributed reward-model training runs
//!
//! Gantry is a single-binary tool that assembles one distributed training
//! invocation (`deepspeed --module openrlhf.cli.train_rm <flags...>`) from a
//! structured, validated configuration record and dispatches it.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`core`] - Domain types, configuration schema, and invocation assembly
//! - [`launcher`] - Capability interface for dispatching an invocation
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Gantry maintains the following invariants:
//!
//! 1. The invocation is constructed once, validated, and never mutated
//! 2. Assembly is deterministic: identical configs yield byte-identical argv
//! 3. Cluster-managed mode never spawns a local child process
//! 4. A locally spawned child's exit code is propagated verbatim

pub mod cli;
pub mod core;
pub mod launcher;
pub mod ui;
