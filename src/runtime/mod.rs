//! Stage runtime and public API
//!
//! This module provides the [`Stage`] facade that owns the actor table, the
//! run/selection context and the configuration, plus the subsystems it
//! coordinates: interpreter passes, the join barrier, and collision handling.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// Submodules
pub mod actor;
pub mod collision;
pub mod context;
pub mod control;
pub mod coordinator;
pub mod error;
pub mod ids;
pub mod state;
pub mod storage;

use actor::{Bounds, Point};
use error::{Result, StageError};
use ids::SPRITE_POOL;

use crate::interpreter::PassSettings;

/// Configuration for a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Box every actor position is clamped into
    pub bounds: Bounds,

    /// Delay after each MOVE/TURN/GOTO/REPEAT step, in milliseconds
    pub step_delay_ms: u64,

    /// Distance below which two actors collide
    pub collision_distance: f64,

    /// How long the reversal banner is held, in milliseconds
    pub reversal_hold_ms: u64,

    /// Banner text shown over a colliding pair
    pub reversal_message: String,

    /// Roster cap
    pub max_actors: usize,

    /// Roster floor
    pub min_actors: usize,

    /// Actors a new stage starts with
    pub initial_actors: usize,

    /// Where newly added actors appear
    pub spawn_position: Point,

    /// Events buffered per rendering-feed subscriber
    pub event_capacity: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            step_delay_ms: 300,
            collision_distance: collision::DEFAULT_COLLISION_DISTANCE,
            reversal_hold_ms: 1500,
            reversal_message: "Direction Reversed!".to_string(),
            max_actors: SPRITE_POOL.len(),
            min_actors: 1,
            initial_actors: 3,
            spawn_position: Point::new(200.0, 200.0),
            event_capacity: 1024,
        }
    }
}

impl StageConfig {
    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        if !(b.min_x <= b.max_x && b.min_y <= b.max_y) {
            return Err(StageError::Config(format!("empty stage bounds {:?}", b)));
        }
        if !self.collision_distance.is_finite() || self.collision_distance < 0.0 {
            return Err(StageError::Config(format!(
                "collision distance must be a non-negative number, got {}",
                self.collision_distance
            )));
        }
        if self.min_actors == 0 || self.max_actors > SPRITE_POOL.len() {
            return Err(StageError::Config(format!(
                "roster limits must lie within 1..={}",
                SPRITE_POOL.len()
            )));
        }
        if !(self.min_actors <= self.initial_actors && self.initial_actors <= self.max_actors) {
            return Err(StageError::Config(format!(
                "initial actor count {} outside {}..={}",
                self.initial_actors, self.min_actors, self.max_actors
            )));
        }
        Ok(())
    }

    /// Step delay as a duration
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Banner hold as a duration
    pub fn reversal_hold(&self) -> Duration {
        Duration::from_millis(self.reversal_hold_ms)
    }

    /// Interpreter settings derived from this config
    pub fn pass_settings(&self) -> PassSettings {
        PassSettings {
            bounds: self.bounds,
            step_delay: self.step_delay(),
        }
    }
}

// Re-export commonly used types
pub use control::Stage;
pub use coordinator::RunReport;
pub use ids::ActorId;
