//! Typed block commands
//!
//! A [`Command`] is a value: editing produces a new command rather than
//! mutating shared state, and creation deep-copies the template parameters so
//! palette entries are never aliased by authored instances.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value::Param;
use crate::runtime::error::{ProgramError, ProgramResult};
use crate::runtime::ids::InstanceId;

/// The closed set of instructions a program may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Move along the current heading.
    Move,
    /// Rotate by a number of degrees.
    Turn,
    /// Jump to absolute coordinates.
    Goto,
    /// Rotate 90° a number of times.
    Repeat,
    /// Show a speech bubble for a number of seconds.
    Say,
    /// Show a thought bubble for a number of seconds.
    Think,
}

/// Palette grouping of command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Position and heading changes.
    Motion,
    /// Annotation changes.
    Looks,
}

impl CommandKind {
    /// All kinds in palette order.
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Move,
        CommandKind::Turn,
        CommandKind::Goto,
        CommandKind::Repeat,
        CommandKind::Say,
        CommandKind::Think,
    ];

    /// Number of parameters commands of this kind carry.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::Move | CommandKind::Turn | CommandKind::Repeat => 1,
            CommandKind::Goto | CommandKind::Say | CommandKind::Think => 2,
        }
    }

    /// Palette category.
    pub fn category(self) -> Category {
        match self {
            CommandKind::Say | CommandKind::Think => Category::Looks,
            _ => Category::Motion,
        }
    }

    /// Label template with one `{}` hole per parameter.
    pub fn label(self) -> &'static str {
        match self {
            CommandKind::Move => "Move {} steps",
            CommandKind::Turn => "Turn {} degrees",
            CommandKind::Goto => "Go to x:{} y:{}",
            CommandKind::Repeat => "Repeat {} times",
            CommandKind::Say => "Say {} for {} secs",
            CommandKind::Think => "Think {} for {} secs",
        }
    }

    /// Lowercase identifier used in scene files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Move => "move",
            CommandKind::Turn => "turn",
            CommandKind::Goto => "goto",
            CommandKind::Repeat => "repeat",
            CommandKind::Say => "say",
            CommandKind::Think => "think",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One instruction in a program.
///
/// Only constructible through [`create_command`], which keeps the parameter
/// count equal to the kind's arity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    kind: CommandKind,
    params: Vec<Param>,
    instance_id: InstanceId,
}

/// Create an authored command with a fresh instance id.
///
/// The parameters are copied, never shared with the caller's template.
pub fn create_command(kind: CommandKind, defaults: &[Param]) -> ProgramResult<Command> {
    if defaults.len() != kind.arity() {
        return Err(ProgramError::ArityMismatch {
            kind,
            arity: kind.arity(),
            given: defaults.len(),
        });
    }
    Ok(Command::authored(kind, defaults.to_vec()))
}

impl Command {
    /// Stamp a new instance; callers guarantee `params.len() == kind.arity()`.
    pub(crate) fn authored(kind: CommandKind, params: Vec<Param>) -> Self {
        debug_assert_eq!(params.len(), kind.arity());
        Self {
            kind,
            params,
            instance_id: InstanceId::new(),
        }
    }

    /// Command kind.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Parameters in positional order; always `kind().arity()` long.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameter at `index`, if within arity.
    pub fn param(&self, index: usize) -> Option<&Param> {
        self.params.get(index)
    }

    /// Authoring-time identity.
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// Return a copy with one parameter replaced.
    pub fn with_parameter(&self, index: usize, value: impl Into<Param>) -> ProgramResult<Command> {
        if index >= self.kind.arity() {
            return Err(ProgramError::ParameterOutOfRange {
                kind: self.kind,
                index,
                arity: self.kind.arity(),
            });
        }
        let mut next = self.clone();
        next.params[index] = value.into();
        Ok(next)
    }

    /// The command that undoes this one's direction.
    ///
    /// MOVE and TURN negate their amount, GOTO negates both coordinates, and
    /// REPEAT/SAY/THINK come back unchanged. Order-preserving and total.
    pub fn negated(&self) -> Command {
        let mut next = self.clone();
        match self.kind {
            CommandKind::Move | CommandKind::Turn => {
                next.params[0] = self.params[0].negated();
            }
            CommandKind::Goto => {
                next.params = self.params.iter().map(Param::negated).collect();
            }
            CommandKind::Repeat | CommandKind::Say | CommandKind::Think => {}
        }
        next
    }

    /// Human-readable label with parameters substituted.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let mut params = self.params.iter();
        for (i, part) in self.kind.label().split("{}").enumerate() {
            if i > 0 {
                if let Some(param) = params.next() {
                    out.push_str(&param.to_string());
                }
            }
            out.push_str(part);
        }
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_honours_width() {
        assert_eq!(format!("[{:<7}]", CommandKind::Say), "[say    ]");
        assert_eq!(format!("{}", CommandKind::Repeat), "repeat");
    }

    fn cmd(kind: CommandKind, params: &[Param]) -> Command {
        create_command(kind, params).unwrap()
    }

    #[test]
    fn create_enforces_arity() {
        let err = create_command(CommandKind::Goto, &[Param::from(1)]).unwrap_err();
        assert_eq!(
            err,
            ProgramError::ArityMismatch {
                kind: CommandKind::Goto,
                arity: 2,
                given: 1
            }
        );
    }

    #[test]
    fn create_assigns_fresh_instance_ids() {
        let a = cmd(CommandKind::Move, &[Param::from(10)]);
        let b = cmd(CommandKind::Move, &[Param::from(10)]);
        assert_ne!(a.instance_id(), b.instance_id());
        assert_eq!(a.params(), b.params());
    }

    #[test]
    fn with_parameter_replaces_one_slot() {
        let say = cmd(CommandKind::Say, &[Param::from("Hello!"), Param::from(2)]);
        let edited = say.with_parameter(1, 5).unwrap();
        assert_eq!(edited.params(), &[Param::from("Hello!"), Param::from(5)]);
        assert_eq!(edited.instance_id(), say.instance_id());
        assert_eq!(say.params()[1], Param::from(2));
    }

    #[test]
    fn with_parameter_rejects_index_past_arity() {
        let turn = cmd(CommandKind::Turn, &[Param::from(15)]);
        assert!(matches!(
            turn.with_parameter(1, 3),
            Err(ProgramError::ParameterOutOfRange { index: 1, arity: 1, .. })
        ));
    }

    #[test]
    fn negation_by_kind() {
        let goto = cmd(CommandKind::Goto, &[Param::from(40), Param::from(-7)]);
        assert_eq!(goto.negated().params(), &[Param::from(-40), Param::from(7)]);

        let repeat = cmd(CommandKind::Repeat, &[Param::from(3)]);
        assert_eq!(repeat.negated(), repeat);

        let think = cmd(CommandKind::Think, &[Param::from("Hmm..."), Param::from(2)]);
        assert_eq!(think.negated(), think);
    }

    #[test]
    fn describe_fills_label() {
        let goto = cmd(CommandKind::Goto, &[Param::from(10), Param::from(2.5)]);
        assert_eq!(goto.describe(), "Go to x:10 y:2.5");
        let say = cmd(CommandKind::Say, &[Param::from("Hi"), Param::from(1)]);
        assert_eq!(say.to_string(), "Say Hi for 1 secs");
    }
}
