//! Block program model and interpreter.
//!
//! Commands are authored from palette templates, collected into an actor's
//! [`Program`], and executed by a [`Pass`]: a lazy sequence of timed patches
//! that [`drive`] plays against the live actor table.

/// Typed command values and their negation rule.
pub mod command;
/// Palette templates commands are authored from.
pub mod palette;
/// Lazy per-actor program interpretation.
pub mod pass;
/// Ordered command lists.
pub mod program;
/// Async driver applying passes to actor state.
pub mod runtime;
/// Numeric-or-text parameter values.
pub mod value;

pub use command::{Category, Command, CommandKind, create_command};
pub use palette::{Template, palette, template};
pub use pass::{Pass, PassSettings, Step, interpret};
pub use program::Program;
pub use runtime::drive;
pub use value::Param;
