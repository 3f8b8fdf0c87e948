//! # Janitor
//!
//! Run maintenance tasks with recorded progress, timing, and outcome.
//!
//! A task collects a batch of entities and processes them one at a time.
//! The [`Runner`] creates a run record through your store, drives the task,
//! and persists the record as it moves `enqueued -> running -> succeeded | failed`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use janitor::{MaintenanceTask, RunnerBuilder, TaskDeps, TaskError, TracingLogger};
//!
//! struct ExpireSessions { db: Db }
//!
//! #[async_trait::async_trait]
//! impl MaintenanceTask for ExpireSessions {
//!     type Entity = SessionId;
//!
//!     fn name(&self) -> &str {
//!         "cleanup-expired-sessions"
//!     }
//!
//!     async fn collection(&self, _deps: TaskDeps<'_>) -> Result<Vec<SessionId>, TaskError> {
//!         Ok(self.db.expired_sessions().await?)
//!     }
//!
//!     async fn process(&self, _deps: TaskDeps<'_>, id: SessionId) -> Result<(), TaskError> {
//!         Ok(self.db.delete_session(id).await?)
//!     }
//! }
//!
//! let mut runner = RunnerBuilder::new(store)
//!     .logger(TracingLogger)
//!     .build();
//!
//! let run = runner.run(&ExpireSessions { db }).await?;
//! println!("{} finished as {}", run.task_name, run.status);
//! ```
//!
//! ## Failure channels
//!
//! - Errors from collection, processing, or the running persist are recorded
//!   on the returned run (`status == Failed`, `error_*` fields set).
//! - Store errors while creating the run or persisting its terminal state are
//!   returned as `Err(StoreError)`.

pub mod clock;
pub mod error;
pub mod logger;
pub mod runner;
pub mod status;
pub mod task;
pub mod task_run;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StoreError, TaskError};
pub use logger::{NoopLogger, RunLogger, TracingLogger};
pub use runner::{Runner, RunnerBuilder, TaskRunStore};
pub use status::{ParseStatusError, Status};
pub use task::{MaintenanceTask, TaskDeps};
pub use task_run::{ErrorAttributes, TaskRun, TaskRunCreateInput};
