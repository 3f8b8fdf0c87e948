//! Maintenance task trait.

use async_trait::async_trait;

use crate::error::TaskError;
use crate::runner::Runner;
use crate::task_run::TaskRun;

/// What a task sees while it runs.
///
/// `runner` exposes live progress (cursor, size, elapsed time). `task_run`
/// is the in-memory record; tasks may write `metadata` on it.
pub struct TaskDeps<'a> {
    pub runner: &'a Runner,
    pub task_run: &'a mut TaskRun,
}

/// A unit of maintenance work: collect entities, then process them one at a time.
#[async_trait]
pub trait MaintenanceTask: Send + Sync {
    /// The entity type produced by `collection` and consumed by `process`.
    type Entity: Send;

    /// The name recorded on each run.
    fn name(&self) -> &str;

    /// Stable identifier for the task, independent of its name.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Human-readable description of the task and the entities it affects.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Source text of the task, kept for auditing what ran.
    fn source(&self) -> Option<&str> {
        None
    }

    /// Collect all entities to be processed.
    async fn collection(&self, deps: TaskDeps<'_>) -> Result<Vec<Self::Entity>, TaskError>;

    /// Process one entity.
    async fn process(&self, deps: TaskDeps<'_>, item: Self::Entity) -> Result<(), TaskError>;
}
