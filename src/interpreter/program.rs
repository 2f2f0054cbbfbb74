use serde::Serialize;

use super::command::Command;
use super::value::Param;
use crate::runtime::error::{ProgramError, ProgramResult};

/// An actor's ordered command list; order is execution order.
///
/// Mutation goes through append, parameter update and remove-at-index only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Program {
    commands: Vec<Command>,
}

impl Program {
    /// Empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command at the end.
    pub fn append(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Replace one parameter of the command at `index`.
    pub fn update_parameter(
        &mut self,
        index: usize,
        param_index: usize,
        value: impl Into<Param>,
    ) -> ProgramResult<()> {
        let len = self.commands.len();
        let slot = self
            .commands
            .get_mut(index)
            .ok_or(ProgramError::CommandOutOfRange { index, len })?;
        *slot = slot.with_parameter(param_index, value)?;
        Ok(())
    }

    /// Remove and return the command at `index`.
    pub fn remove(&mut self, index: usize) -> ProgramResult<Command> {
        if index >= self.commands.len() {
            return Err(ProgramError::CommandOutOfRange {
                index,
                len: self.commands.len(),
            });
        }
        Ok(self.commands.remove(index))
    }

    /// Every command negated, order and instance ids preserved.
    pub fn negated(&self) -> Program {
        Program {
            commands: self.commands.iter().map(Command::negated).collect(),
        }
    }

    /// Commands in execution order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when the program has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<Command> for Program {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{CommandKind, palette::template};

    fn sample() -> Program {
        [CommandKind::Move, CommandKind::Turn, CommandKind::Say]
            .into_iter()
            .map(|kind| template(kind).instantiate())
            .collect()
    }

    #[test]
    fn remove_out_of_range_is_signalled() {
        let mut program = sample();
        assert_eq!(
            program.remove(3),
            Err(ProgramError::CommandOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(program.len(), 3);
        assert_eq!(program.remove(1).unwrap().kind(), CommandKind::Turn);
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn update_parameter_checks_both_indices() {
        let mut program = sample();
        program.update_parameter(0, 0, 25).unwrap();
        assert_eq!(program.commands()[0].params()[0], Param::from(25));
        assert!(matches!(
            program.update_parameter(9, 0, 1),
            Err(ProgramError::CommandOutOfRange { index: 9, len: 3 })
        ));
        assert!(matches!(
            program.update_parameter(0, 1, 1),
            Err(ProgramError::ParameterOutOfRange { .. })
        ));
    }

    #[test]
    fn negated_preserves_order_and_ids() {
        let program = sample();
        let reversed = program.negated();
        for (a, b) in program.commands().iter().zip(reversed.commands()) {
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.instance_id(), b.instance_id());
        }
        assert_eq!(reversed.commands()[0].params()[0], Param::from(-10));
    }
}
