//! One sequential execution of an actor's program, as a lazy step sequence.
//!
//! A [`Pass`] owns a local working copy of the actor's pose. Each call to
//! `next` advances the program and yields the patch to publish together with
//! how long to wait before the following step. No shared state is read, so a
//! pass only ever sees its own updates.

use std::time::Duration;

use super::command::{Command, CommandKind};
use super::program::Program;
use super::value::Param;
use crate::runtime::actor::{Annotation, AnnotationKind, Bounds, Patch, Point, Pose};

/// Default MOVE/TURN/GOTO/REPEAT step delay.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(300);
/// Heading change per REPEAT iteration.
pub const REPEAT_TURN_DEGREES: f64 = 90.0;
/// SAY/THINK duration used when the authored one is unusable.
pub const DEFAULT_MESSAGE_SECS: f64 = 2.0;

/// Timing and geometry a pass runs under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSettings {
    /// Stage box positions are clamped into.
    pub bounds: Bounds,
    /// Delay after each motion step.
    pub step_delay: Duration,
}

impl Default for PassSettings {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            step_delay: DEFAULT_STEP_DELAY,
        }
    }
}

/// A patch plus the suspension that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Update to apply to the actor.
    pub patch: Patch,
    /// Time to wait before the next step starts.
    pub delay: Duration,
}

/// Lazy interpretation of one program from a starting pose.
#[derive(Debug, Clone)]
pub struct Pass {
    commands: Vec<Command>,
    cursor: usize,
    pose: Pose,
    settings: PassSettings,
    repeats_left: u64,
    clear_pending: bool,
}

/// Start interpreting `program` from `start`.
pub fn interpret(program: &Program, start: Pose, settings: PassSettings) -> Pass {
    Pass {
        commands: program.commands().to_vec(),
        cursor: 0,
        pose: start,
        settings,
        repeats_left: 0,
        clear_pending: false,
    }
}

impl Pass {
    /// Working pose after the steps yielded so far.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Whether every step has been yielded.
    pub fn is_finished(&self) -> bool {
        !self.clear_pending && self.repeats_left == 0 && self.cursor >= self.commands.len()
    }

    fn turn_step(&mut self, degrees: f64) -> Step {
        self.pose.heading += degrees;
        Step {
            patch: Patch::heading(self.pose.heading),
            delay: self.settings.step_delay,
        }
    }

    fn place_step(&mut self, target: Point) -> Step {
        self.pose.position = self.settings.bounds.clamp(target);
        Step {
            patch: Patch::position(self.pose.position),
            delay: self.settings.step_delay,
        }
    }

    fn message_step(&mut self, command: &Command, kind: AnnotationKind) -> Step {
        let text = command.param(0).map(Param::as_message).unwrap_or_default();
        let secs = command
            .param(1)
            .map_or(DEFAULT_MESSAGE_SECS, |p| p.number_or(DEFAULT_MESSAGE_SECS));
        self.clear_pending = true;
        Step {
            patch: Patch::show(Annotation { text, kind }),
            delay: message_delay(secs),
        }
    }

    fn execute(&mut self, command: &Command) -> Step {
        match command.kind() {
            CommandKind::Move => {
                let steps = numeric(command, 0);
                let theta = self.pose.heading.to_radians();
                let origin = self.pose.position;
                self.place_step(Point::new(
                    origin.x + steps * theta.cos(),
                    origin.y + steps * theta.sin(),
                ))
            }
            CommandKind::Turn => self.turn_step(numeric(command, 0)),
            CommandKind::Goto => self.place_step(Point::new(numeric(command, 0), numeric(command, 1))),
            CommandKind::Repeat => {
                let times = repeat_count(command.param(0));
                self.repeats_left = times - 1;
                self.turn_step(REPEAT_TURN_DEGREES)
            }
            CommandKind::Say => self.message_step(command, AnnotationKind::Say),
            CommandKind::Think => self.message_step(command, AnnotationKind::Think),
        }
    }
}

impl Iterator for Pass {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.clear_pending {
            self.clear_pending = false;
            return Some(Step {
                patch: Patch::clear_annotation(),
                delay: Duration::ZERO,
            });
        }
        if self.repeats_left > 0 {
            self.repeats_left -= 1;
            return Some(self.turn_step(REPEAT_TURN_DEGREES));
        }
        let command = self.commands.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(self.execute(&command))
    }
}

fn numeric(command: &Command, index: usize) -> f64 {
    command.param(index).and_then(Param::as_number).unwrap_or(0.0)
}

/// Iteration count for REPEAT: unusable or non-positive counts run once,
/// fractional counts round up.
fn repeat_count(param: Option<&Param>) -> u64 {
    match param.and_then(Param::as_number) {
        Some(n) if n > 0.0 => n.ceil() as u64,
        _ => 1,
    }
}

fn message_delay(secs: f64) -> Duration {
    Duration::from_millis((secs * 1000.0).max(0.0).round() as u64)
}
