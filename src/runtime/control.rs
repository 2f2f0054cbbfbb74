//! Stage control facade for front ends and tests
//!
//! Provides the high-level API the authoring surface talks to: roster and
//! selection management, program editing, and the Play/Reset triggers.

use parking_lot::Mutex;
use tokio::sync::broadcast;

use super::StageConfig;
use super::actor::{Actor, Patch, Pose};
use super::context::{RunPhase, StageContext};
use super::coordinator::{PhaseGuard, RunCoordinator, RunReport};
use super::error::{ActorError, ActorResult, Result};
use super::ids::{ActorId, SPRITE_POOL};
use super::state::{ActorTable, StageEvent, layout_position};
use crate::interpreter::{Command, Param};

/// A stage of actors and the context needed to run them
pub struct Stage {
    config: StageConfig,
    table: ActorTable,
    context: Mutex<StageContext>,
}

impl Stage {
    /// Create a stage with the configured number of actors at the grid
    /// layout; the first one is selected
    pub fn new(config: StageConfig) -> Result<Self> {
        config.validate()?;

        let table = ActorTable::new(config.event_capacity, config.bounds);
        for (index, identity) in SPRITE_POOL.iter().take(config.initial_actors).enumerate() {
            table.insert(Actor::new(identity, layout_position(index)));
        }
        let context = Mutex::new(StageContext::new(SPRITE_POOL[0].id));

        Ok(Self {
            config,
            table,
            context,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Live actor table
    pub fn table(&self) -> &ActorTable {
        &self.table
    }

    /// Subscribe to the rendering feed
    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.table.subscribe()
    }

    /// Copy of every actor in roster order
    pub fn actors(&self) -> Vec<Actor> {
        self.table.snapshot()
    }

    /// Copy of one actor
    pub fn actor(&self, id: ActorId) -> Option<Actor> {
        self.table.get(id)
    }

    /// Current run phase
    pub fn phase(&self) -> RunPhase {
        self.context.lock().phase()
    }

    /// Whether a run is in progress (Play and Reset are disabled)
    pub fn is_running(&self) -> bool {
        self.phase().is_active()
    }

    /// Actor selected for editing
    pub fn selected(&self) -> ActorId {
        self.context.lock().selected()
    }

    /// Select an actor for editing
    pub fn select(&self, id: ActorId) -> ActorResult<()> {
        if self.table.get(id).is_none() {
            return Err(ActorError::NotFound(id));
        }
        self.context.lock().select(id);
        Ok(())
    }

    /// Add the next unused pool identity at the spawn position.
    ///
    /// Refused (`None`) at the roster cap or while a run is in progress.
    pub fn add_actor(&self) -> Option<ActorId> {
        let ctx = self.context.lock();
        if ctx.phase().is_active() {
            tracing::warn!("Refusing to add an actor while a run is in progress");
            return None;
        }
        let live = self.table.ids();
        if live.len() >= self.config.max_actors {
            tracing::warn!("Refusing to add an actor: roster is full ({})", live.len());
            return None;
        }
        let identity = SPRITE_POOL.iter().find(|identity| !live.contains(&identity.id))?;
        self.table.insert(Actor::new(identity, self.config.spawn_position));
        tracing::info!("Added {} ({})", identity.id, identity.name);
        Some(identity.id)
    }

    /// Remove an actor.
    ///
    /// Returns `Ok(false)` when refused: at the roster floor or while a run is
    /// in progress. Removing the selected actor selects the first remaining.
    pub fn remove_actor(&self, id: ActorId) -> ActorResult<bool> {
        let mut ctx = self.context.lock();
        if self.table.get(id).is_none() {
            return Err(ActorError::NotFound(id));
        }
        if ctx.phase().is_active() {
            tracing::warn!("Refusing to remove {} while a run is in progress", id);
            return Ok(false);
        }
        if self.table.len() <= self.config.min_actors {
            tracing::warn!("Refusing to remove {}: roster is at its floor", id);
            return Ok(false);
        }
        self.table.remove(id);
        if ctx.selected() == id {
            if let Some(&first) = self.table.ids().first() {
                ctx.select(first);
            }
        }
        tracing::info!("Removed {}", id);
        Ok(true)
    }

    /// Move an actor to a pose (clamped into the stage); refused while running
    pub fn place(&self, id: ActorId, pose: Pose) -> ActorResult<bool> {
        let ctx = self.context.lock();
        if ctx.phase().is_active() {
            return Ok(false);
        }
        let patch = Patch {
            position: Some(pose.position),
            heading: Some(pose.heading),
            annotation: None,
        };
        self.table.apply_patch(id, patch)?;
        Ok(true)
    }

    /// Append a command to the selected actor's program
    pub fn append_command(&self, command: Command) -> Result<()> {
        self.append_command_to(self.selected(), command)
    }

    /// Append a command to a specific actor's program
    pub fn append_command_to(&self, id: ActorId, command: Command) -> Result<()> {
        self.table.edit_program(id, |program| {
            program.append(command);
            Ok(())
        })
    }

    /// Replace one parameter of a command in the selected actor's program
    pub fn update_parameter(
        &self,
        index: usize,
        param_index: usize,
        value: impl Into<Param>,
    ) -> Result<()> {
        self.update_parameter_for(self.selected(), index, param_index, value)
    }

    /// Replace one parameter of a command in a specific actor's program
    pub fn update_parameter_for(
        &self,
        id: ActorId,
        index: usize,
        param_index: usize,
        value: impl Into<Param>,
    ) -> Result<()> {
        self.table
            .edit_program(id, |program| program.update_parameter(index, param_index, value))
    }

    /// Remove a command from the selected actor's program
    pub fn remove_command(&self, index: usize) -> Result<Command> {
        self.remove_command_from(self.selected(), index)
    }

    /// Remove a command from a specific actor's program
    pub fn remove_command_from(&self, id: ActorId, index: usize) -> Result<Command> {
        self.table.edit_program(id, |program| program.remove(index))
    }

    /// Run every actor's program, then resolve collisions.
    ///
    /// Returns `Ok(None)` without doing anything if a run is already in
    /// progress.
    pub async fn play(&self) -> Result<Option<RunReport>> {
        let Some(_guard) = PhaseGuard::begin(&self.table, &self.context) else {
            tracing::warn!("Play ignored: a run is already in progress");
            return Ok(None);
        };
        let report = RunCoordinator::new(&self.table, &self.config, &self.context)
            .run()
            .await?;
        Ok(Some(report))
    }

    /// Restore every actor to the grid layout, facing 0° with no bubble.
    ///
    /// Refused (`false`) while a run is in progress.
    pub fn reset(&self) -> bool {
        let ctx = self.context.lock();
        if ctx.phase().is_active() {
            tracing::warn!("Reset ignored: a run is in progress");
            return false;
        }
        self.table.reset_layout();
        true
    }
}
