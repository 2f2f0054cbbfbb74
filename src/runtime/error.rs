//! Error types for the stage runtime
//!
//! Domain errors use thiserror and convert into `StageError` at the facade.
//! Cap violations and malformed parameters are not errors: the former are
//! refused through `Option`/`bool` returns, the latter sanitized.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::ids::ActorId;
use crate::interpreter::CommandKind;

/// Top-level stage error
#[derive(Debug, Error)]
pub enum StageError {
    /// Program editing errors
    #[error("Program error: {0}")]
    Program(#[from] ProgramError),

    /// Actor lookup errors
    #[error("Actor error: {0}")]
    Actor(#[from] ActorError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Program and command editing errors
#[derive(Debug, Error, PartialEq)]
pub enum ProgramError {
    /// Command index past the end of the program
    #[error("Command index {index} out of range for program of length {len}")]
    CommandOutOfRange {
        /// Requested index
        index: usize,
        /// Program length
        len: usize,
    },

    /// Parameter index past the command's arity
    #[error("Parameter index {index} out of range for {kind} (arity {arity})")]
    ParameterOutOfRange {
        /// Command kind
        kind: CommandKind,
        /// Requested index
        index: usize,
        /// Arity of the kind
        arity: usize,
    },

    /// Wrong number of parameters supplied at creation
    #[error("{kind} takes {arity} parameters, got {given}")]
    ArityMismatch {
        /// Command kind
        kind: CommandKind,
        /// Arity of the kind
        arity: usize,
        /// Number of parameters supplied
        given: usize,
    },
}

/// Convenience result alias for program operations
pub type ProgramResult<T> = std::result::Result<T, ProgramError>;

/// Actor lookup errors
#[derive(Debug, Error, PartialEq)]
pub enum ActorError {
    /// Actor not present in the table
    #[error("Actor {0} not found")]
    NotFound(ActorId),
}

/// Convenience result alias for actor operations
pub type ActorResult<T> = std::result::Result<T, ActorError>;

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Scene file is well-formed JSON but describes an invalid stage
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type using StageError
pub type Result<T> = std::result::Result<T, StageError>;
