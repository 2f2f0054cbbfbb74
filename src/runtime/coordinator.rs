//! Run coordinator: concurrent passes, join barrier, collision resolution
//!
//! All passes of a run are polled by one task through a [`PassGroup`], so
//! they interleave cooperatively at their delays and never run on separate
//! threads. The coordinator drives the run state machine through the stage
//! context and publishes every phase change on the rendering feed.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, try_join_all};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::Instant;

use super::StageConfig;
use super::actor::{Actor, RunResult};
use super::collision::{self, CollisionRecord};
use super::context::{ResolveStep, RunPhase, StageContext};
use super::error::ActorResult;
use super::ids::ActorId;
use super::state::{ActorTable, StageEvent};
use crate::interpreter::{Pass, drive, interpret};

/// Outcome of one Play
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run (including resolution) finished
    pub finished_at: DateTime<Utc>,
    /// First-pass results, in run-start roster order
    pub results: Vec<RunResult>,
    /// Collisions resolved, in resolution order
    pub collisions: Vec<CollisionRecord>,
}

/// Join barrier over a set of concurrently driven passes
#[derive(Default)]
pub struct PassGroup<'a> {
    passes: Vec<BoxFuture<'a, ActorResult<RunResult>>>,
}

impl<'a> PassGroup<'a> {
    /// Empty group
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add a pass; it starts when the group is joined
    pub fn launch(&mut self, table: &'a ActorTable, actor: ActorId, pass: Pass) {
        self.passes.push(Box::pin(drive(table, actor, pass)));
    }

    /// Number of passes in the group
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// True when no pass was launched
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Wait for every pass; results come back in launch order
    pub async fn join(self) -> ActorResult<Vec<RunResult>> {
        try_join_all(self.passes).await
    }
}

/// Drives one run against a stage's table and context
pub struct RunCoordinator<'a> {
    table: &'a ActorTable,
    config: &'a StageConfig,
    context: &'a Mutex<StageContext>,
}

impl<'a> RunCoordinator<'a> {
    /// Create a coordinator over borrowed stage parts
    pub fn new(
        table: &'a ActorTable,
        config: &'a StageConfig,
        context: &'a Mutex<StageContext>,
    ) -> Self {
        Self {
            table,
            config,
            context,
        }
    }

    /// The actor table passes write to
    pub fn table(&self) -> &'a ActorTable {
        self.table
    }

    /// Stage configuration
    pub fn config(&self) -> &'a StageConfig {
        self.config
    }

    /// Run one pass per actor concurrently and wait for all of them
    pub async fn run_all(&self, actors: &[Actor]) -> ActorResult<Vec<RunResult>> {
        let settings = self.config.pass_settings();
        let mut group = PassGroup::new();
        for actor in actors {
            group.launch(
                self.table,
                actor.id,
                interpret(&actor.program, actor.pose(), settings),
            );
        }
        group.join().await
    }

    /// Full run: first passes, then sequential pairwise resolution.
    ///
    /// The caller must already have moved the context to `Running`.
    pub async fn run(&self) -> ActorResult<RunReport> {
        let started_at = Utc::now();
        let actors = self.table.snapshot();
        tracing::info!("Run started with {} actors", actors.len());

        let results = self.run_all(&actors).await?;
        let pairs = collision::colliding_pairs(&results, self.config.collision_distance);

        let mut collisions = Vec::with_capacity(pairs.len());
        for pair in pairs {
            collisions.push(collision::resolve(self, &actors, &results, pair).await?);
        }

        tracing::info!(
            "Run finished: {} actors, {} collisions",
            results.len(),
            collisions.len()
        );
        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            results,
            collisions,
        })
    }

    pub(crate) fn set_resolving(&self, pair: (ActorId, ActorId), step: ResolveStep) {
        self.context.lock().resolve(pair, step);
        self.table.publish(StageEvent::PhaseChanged {
            phase: RunPhase::Resolving { pair, step },
            at: Instant::now(),
        });
    }
}

/// Returns the context to `Idle` when dropped, even if the run failed
pub(crate) struct PhaseGuard<'a> {
    table: &'a ActorTable,
    context: &'a Mutex<StageContext>,
}

impl<'a> PhaseGuard<'a> {
    /// Enter `Running`; `None` when a run is already in progress
    pub(crate) fn begin(table: &'a ActorTable, context: &'a Mutex<StageContext>) -> Option<Self> {
        if !context.lock().try_begin_run() {
            return None;
        }
        table.publish(StageEvent::PhaseChanged {
            phase: RunPhase::Running,
            at: Instant::now(),
        });
        Some(Self { table, context })
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.context.lock().finish_run();
        self.table.publish(StageEvent::PhaseChanged {
            phase: RunPhase::Idle,
            at: Instant::now(),
        });
    }
}
