//! Live actor table and the rendering feed
//!
//! The table is the only shared mutable resource of a run. Every write is
//! keyed by actor id and applied under one short write lock, so concurrent
//! interpreter passes for different actors commute. Each applied change is
//! published on a broadcast channel for whatever renders the stage.

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::time::Instant;

use super::actor::{Actor, AnnotationUpdate, Bounds, Patch, Point};
use super::context::RunPhase;
use super::error::{ActorError, ActorResult, ProgramResult, StageError};
use super::ids::ActorId;
use crate::interpreter::Program;

/// Change notification published to stage subscribers
#[derive(Debug, Clone)]
pub enum StageEvent {
    /// A patch was merged into an actor
    Patched {
        /// Patched actor
        actor: ActorId,
        /// The applied patch
        patch: Patch,
        /// When the patch was applied
        at: Instant,
    },
    /// An actor's stored program was swapped out by collision resolution
    ProgramReplaced {
        /// Actor whose program changed
        actor: ActorId,
        /// The new program
        program: Program,
    },
    /// The run state machine moved
    PhaseChanged {
        /// New phase
        phase: RunPhase,
        /// When the transition happened
        at: Instant,
    },
    /// An actor joined or left the roster
    RosterChanged {
        /// Roster in stage order after the change
        actors: Vec<ActorId>,
    },
}

/// Ordered table of live actors
///
/// Positions written through the table are clamped into its stage bounds.
pub struct ActorTable {
    actors: RwLock<Vec<Actor>>,
    bounds: Bounds,
    events: broadcast::Sender<StageEvent>,
}

impl ActorTable {
    /// Create an empty table whose feed buffers `capacity` events per subscriber
    pub fn new(capacity: usize, bounds: Bounds) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            actors: RwLock::new(Vec::new()),
            bounds,
            events,
        }
    }

    /// Stage bounds every stored position lies within
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Subscribe to the rendering feed
    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.events.subscribe()
    }

    /// Copy of every actor in roster order
    pub fn snapshot(&self) -> Vec<Actor> {
        self.actors.read().clone()
    }

    /// Copy of one actor
    pub fn get(&self, id: ActorId) -> Option<Actor> {
        self.actors.read().iter().find(|actor| actor.id == id).cloned()
    }

    /// Actor ids in roster order
    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.read().iter().map(|actor| actor.id).collect()
    }

    /// Number of live actors
    pub fn len(&self) -> usize {
        self.actors.read().len()
    }

    /// True when no actor is live
    pub fn is_empty(&self) -> bool {
        self.actors.read().is_empty()
    }

    /// Merge a partial update into one actor, clamping its position
    pub fn apply_patch(&self, id: ActorId, mut patch: Patch) -> ActorResult<()> {
        patch.position = patch.position.map(|position| self.bounds.clamp(position));
        let mut actors = self.actors.write();
        let actor = actors
            .iter_mut()
            .find(|actor| actor.id == id)
            .ok_or(ActorError::NotFound(id))?;
        actor.apply(&patch);
        self.publish(StageEvent::Patched {
            actor: id,
            patch,
            at: Instant::now(),
        });
        Ok(())
    }

    /// Run an edit against one actor's program
    pub fn edit_program<R>(
        &self,
        id: ActorId,
        edit: impl FnOnce(&mut Program) -> ProgramResult<R>,
    ) -> Result<R, StageError> {
        let mut actors = self.actors.write();
        let actor = actors
            .iter_mut()
            .find(|actor| actor.id == id)
            .ok_or(ActorError::NotFound(id))?;
        Ok(edit(&mut actor.program)?)
    }

    /// Swap an actor's stored program
    pub fn replace_program(&self, id: ActorId, program: Program) -> ActorResult<()> {
        let mut actors = self.actors.write();
        let actor = actors
            .iter_mut()
            .find(|actor| actor.id == id)
            .ok_or(ActorError::NotFound(id))?;
        actor.program = program.clone();
        self.publish(StageEvent::ProgramReplaced { actor: id, program });
        Ok(())
    }

    /// Move every actor to its grid slot, facing 0° with no bubble
    pub fn reset_layout(&self) {
        let mut actors = self.actors.write();
        let now = Instant::now();
        for (index, actor) in actors.iter_mut().enumerate() {
            let patch = Patch {
                position: Some(self.bounds.clamp(layout_position(index))),
                heading: Some(0.0),
                annotation: Some(AnnotationUpdate::Clear),
            };
            actor.apply(&patch);
            self.publish(StageEvent::Patched {
                actor: actor.id,
                patch,
                at: now,
            });
        }
    }

    pub(crate) fn insert(&self, mut actor: Actor) {
        actor.position = self.bounds.clamp(actor.position);
        let mut actors = self.actors.write();
        actors.push(actor);
        let ids = actors.iter().map(|actor| actor.id).collect();
        self.publish(StageEvent::RosterChanged { actors: ids });
    }

    pub(crate) fn remove(&self, id: ActorId) -> Option<Actor> {
        let mut actors = self.actors.write();
        let index = actors.iter().position(|actor| actor.id == id)?;
        let removed = actors.remove(index);
        let ids = actors.iter().map(|actor| actor.id).collect();
        self.publish(StageEvent::RosterChanged { actors: ids });
        Some(removed)
    }

    pub(crate) fn publish(&self, event: StageEvent) {
        // No subscribers is fine; rendering is optional.
        let _ = self.events.send(event);
    }
}

/// Grid slot for the actor at `index` in roster order
pub fn layout_position(index: usize) -> Point {
    Point::new(
        100.0 + (index % 2) as f64 * 150.0,
        150.0 + (index / 2) as f64 * 130.0,
    )
}
