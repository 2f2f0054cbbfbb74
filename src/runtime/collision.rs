//! Post-run collision detection and direction reversal
//!
//! Detection is a pairwise distance test over first-pass results. Each hit
//! is resolved on its own: both programs are negated and stored, a banner is
//! held over both actors, and the reversed programs are replayed from where
//! the first pass left them. Replays are not checked again.

use serde::Serialize;

use super::actor::{Actor, Annotation, Patch, RunResult};
use super::context::ResolveStep;
use super::coordinator::{PassGroup, RunCoordinator};
use super::error::ActorResult;
use super::ids::ActorId;
use crate::interpreter::interpret;

/// Default distance below which two actors collide
pub const DEFAULT_COLLISION_DISTANCE: f64 = 60.0;

/// A colliding pair, by index into the run-start roster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Lower roster index
    pub first: usize,
    /// Higher roster index
    pub second: usize,
    /// Distance between the two results
    pub distance: f64,
}

/// Outcome of resolving one collision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionRecord {
    /// The pair, in roster order
    pub actors: (ActorId, ActorId),
    /// Distance that triggered the reversal
    pub distance: f64,
    /// Where the replay pass left each actor
    pub replay: Vec<RunResult>,
}

/// Strict-less-than distance test
pub fn collides(a: &RunResult, b: &RunResult, threshold: f64) -> bool {
    a.position.distance(&b.position) < threshold
}

/// Every colliding pair `(i, j)` with `i < j`, in ascending order
pub fn colliding_pairs(results: &[RunResult], threshold: f64) -> Vec<Collision> {
    let mut pairs = Vec::new();
    for (i, a) in results.iter().enumerate() {
        for (j, b) in results.iter().enumerate().skip(i + 1) {
            if collides(a, b, threshold) {
                pairs.push(Collision {
                    first: i,
                    second: j,
                    distance: a.position.distance(&b.position),
                });
            }
        }
    }
    pairs
}

/// Reverse, announce and replay one colliding pair.
///
/// `actors` and `results` are the run-start roster and its first-pass
/// results; the reversed programs derive from the run-start programs.
pub async fn resolve(
    coordinator: &RunCoordinator<'_>,
    actors: &[Actor],
    results: &[RunResult],
    collision: Collision,
) -> ActorResult<CollisionRecord> {
    let (a, b) = (&actors[collision.first], &actors[collision.second]);
    let pair = (a.id, b.id);
    let table = coordinator.table();
    let config = coordinator.config();
    tracing::info!(
        "Collision between {} and {} at distance {:.1}; reversing",
        a.id,
        b.id,
        collision.distance
    );

    let reversed_a = a.program.negated();
    let reversed_b = b.program.negated();
    table.replace_program(a.id, reversed_a.clone())?;
    table.replace_program(b.id, reversed_b.clone())?;

    coordinator.set_resolving(pair, ResolveStep::Announcing);
    let banner = Annotation::say(config.reversal_message.clone());
    table.apply_patch(a.id, Patch::show(banner.clone()))?;
    table.apply_patch(b.id, Patch::show(banner))?;
    tokio::time::sleep(config.reversal_hold()).await;
    table.apply_patch(a.id, Patch::clear_annotation())?;
    table.apply_patch(b.id, Patch::clear_annotation())?;

    coordinator.set_resolving(pair, ResolveStep::Replaying);
    let settings = config.pass_settings();
    let mut group = PassGroup::new();
    group.launch(
        table,
        a.id,
        interpret(&reversed_a, results[collision.first].pose(), settings),
    );
    group.launch(
        table,
        b.id,
        interpret(&reversed_b, results[collision.second].pose(), settings),
    );
    let replay = group.join().await?;

    Ok(CollisionRecord {
        actors: pair,
        distance: collision.distance,
        replay,
    })
}
