//! Identifiers for actors and authored command instances
//!
//! Actor identities come from a small fixed pool so a removed actor's slot can
//! be handed out again; command instance ids are random and never reused.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Actor identifier, drawn from the fixed sprite pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor-{}", self.0)
    }
}

/// Unique token distinguishing otherwise-identical commands in a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    /// Create a new random InstanceId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cosmetic identity attached to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteIdentity {
    /// Pool slot
    pub id: ActorId,
    /// Glyph drawn on stage
    pub glyph: &'static str,
    /// Display name
    pub name: &'static str,
}

/// The fixed identity pool, in allocation order
pub const SPRITE_POOL: [SpriteIdentity; 4] = [
    SpriteIdentity { id: ActorId(1), glyph: "🐱", name: "Cat" },
    SpriteIdentity { id: ActorId(2), glyph: "🐶", name: "Dog" },
    SpriteIdentity { id: ActorId(3), glyph: "🦊", name: "Fox" },
    SpriteIdentity { id: ActorId(4), glyph: "🐼", name: "Panda" },
];
