//! Block palette templates offered to the authoring surface.

use serde::Serialize;

use super::command::{Category, Command, CommandKind};
use super::value::Param;

/// A palette entry: a command kind with its default parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    /// Command kind produced by this template.
    pub kind: CommandKind,
    params: Vec<Param>,
}

impl Template {
    fn new(kind: CommandKind, params: Vec<Param>) -> Self {
        debug_assert_eq!(params.len(), kind.arity());
        Self { kind, params }
    }

    /// Default parameters, `kind.arity()` long.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Palette category of the template.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Author a fresh command from this template.
    pub fn instantiate(&self) -> Command {
        Command::authored(self.kind, self.params.clone())
    }
}

/// All templates in display order (motion first, then looks).
pub fn palette() -> Vec<Template> {
    CommandKind::ALL.into_iter().map(template).collect()
}

/// Template for a single kind.
pub fn template(kind: CommandKind) -> Template {
    let params = match kind {
        CommandKind::Move => vec![Param::from(10)],
        CommandKind::Turn => vec![Param::from(15)],
        CommandKind::Goto => vec![Param::from(0), Param::from(0)],
        CommandKind::Repeat => vec![Param::from(2)],
        CommandKind::Say => vec![Param::from("Hello!"), Param::from(2)],
        CommandKind::Think => vec![Param::from("Hmm..."), Param::from(2)],
    };
    Template::new(kind, params)
}
