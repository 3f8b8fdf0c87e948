//! Task run storage trait.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::task_run::{TaskRun, TaskRunCreateInput};

/// Trait for task run storage backends.
#[async_trait]
pub trait TaskRunStore: Send + Sync {
    /// Create a run record. The returned record must carry its `id`.
    async fn create(&self, input: TaskRunCreateInput) -> Result<TaskRun, StoreError>;

    /// Persist the full current state of a run record.
    async fn update(&self, run: &TaskRun) -> Result<(), StoreError>;
}
