//! Blockstage – block programs for concurrently animated stage actors
//!
//! This crate implements the execution side of a block-based stage:
//! - Typed commands authored from palette templates into per-actor programs
//! - An interpreter that turns a program into timed, per-actor patches
//! - A coordinator that runs every actor's program concurrently in lockstep
//! - Post-run collision resolution that reverses and replays colliding actors

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Block program model and interpreter
pub mod interpreter;
/// Stage runtime: actors, coordination, collision handling
pub mod runtime;

// Re-export key types for convenience
pub use runtime::{Stage, StageConfig};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
