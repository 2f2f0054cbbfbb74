//! Run/selection context shared by the stage facade and the coordinator
//!
//! Holds the two pieces of process-wide state the stage needs: which actor
//! is selected for editing, and where the run state machine currently is.

use serde::{Deserialize, Serialize};

use super::ids::ActorId;

/// Sub-state while a colliding pair is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveStep {
    /// Showing the reversal banner
    Announcing,
    /// Replaying the reversed programs
    Replaying,
}

/// Run state machine: Idle → Running → Resolving* → Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    /// No run in progress; Play, Reset and roster edits are allowed
    Idle,
    /// First-pass interpreters are active
    Running,
    /// Handling one colliding pair
    Resolving {
        /// The pair, in roster order
        pair: (ActorId, ActorId),
        /// Current sub-state
        step: ResolveStep,
    },
}

impl RunPhase {
    /// Whether this phase belongs to an in-flight run
    pub fn is_active(&self) -> bool {
        !matches!(self, RunPhase::Idle)
    }
}

/// Mutable stage context guarded by the stage's mutex
#[derive(Debug, Clone)]
pub struct StageContext {
    phase: RunPhase,
    selected: ActorId,
}

impl StageContext {
    /// Idle context with `selected` chosen for editing
    pub fn new(selected: ActorId) -> Self {
        Self {
            phase: RunPhase::Idle,
            selected,
        }
    }

    /// Current phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Selected actor
    pub fn selected(&self) -> ActorId {
        self.selected
    }

    /// Change the selected actor
    pub fn select(&mut self, actor: ActorId) {
        self.selected = actor;
    }

    /// Enter `Running` if idle; false when a run is already in progress
    pub fn try_begin_run(&mut self) -> bool {
        if self.phase.is_active() {
            return false;
        }
        self.phase = RunPhase::Running;
        true
    }

    /// Move to a resolving sub-state
    pub fn resolve(&mut self, pair: (ActorId, ActorId), step: ResolveStep) {
        self.phase = RunPhase::Resolving { pair, step };
    }

    /// Return to `Idle`
    pub fn finish_run(&mut self) {
        self.phase = RunPhase::Idle;
    }
}
