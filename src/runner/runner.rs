//! Runner that sequences one maintenance task execution.

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::store::TaskRunStore;
use crate::clock::{Clock, SystemClock};
use crate::error::{StoreError, TaskError};
use crate::logger::{NoopLogger, RunLogger};
use crate::status::Status;
use crate::task::{MaintenanceTask, TaskDeps};
use crate::task_run::{ErrorAttributes, TaskRun, TaskRunCreateInput};

/// Type alias for the one-shot id generator.
type GenerateIdFn = Box<dyn FnOnce() -> String + Send>;

/// Drives a task through `enqueued -> running -> succeeded | failed`,
/// tracking progress and elapsed time on the way.
pub struct Runner {
    id: String,
    item_cursor: usize,
    item_progress: u8,
    item_size: usize,
    start_time: Option<Instant>,
    status: Option<Status>,
    store: Arc<dyn TaskRunStore>,
    logger: Arc<dyn RunLogger>,
    clock: Arc<dyn Clock>,
}

impl Runner {
    /// The runner's own id, distinct from any run id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 1-based index of the most recently started item.
    pub fn item_cursor(&self) -> usize {
        self.item_cursor
    }

    /// 100 once every collected item is processed, 0 before that.
    pub fn item_progress(&self) -> u8 {
        self.item_progress
    }

    /// Number of items collected for the current run.
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Last status the runner moved its run to.
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Instant processing began, if it has.
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Milliseconds since processing began, or 0 before that.
    pub fn time_running(&self) -> f64 {
        match self.start_time {
            None => 0.0,
            Some(start) => {
                let elapsed = self.clock.elapsed(start);
                elapsed.as_secs() as f64 * 1000.0 + elapsed.subsec_nanos() as f64 / 1_000_000.0
            }
        }
    }

    /// Run a task to a terminal state and return its run record.
    ///
    /// Failures in collection, processing, or the running persist are
    /// recorded on the returned run. Only store failures while creating the
    /// run or persisting its terminal state are returned as `Err`.
    pub async fn run<T: MaintenanceTask>(&mut self, task: &T) -> Result<TaskRun, StoreError> {
        self.reset();

        let mut task_run = self.enqueue(task).await?;
        self.start_time = Some(self.clock.now());
        task_run.status = Status::Running;
        self.status = Some(Status::Running);

        self.logger.info(&format!("{} running...", task.name()));

        match self.execute(task, &mut task_run).await {
            Ok(()) => self.complete(task, &mut task_run).await?,
            Err(err) => self.fail(task, &mut task_run, err).await?,
        }

        Ok(task_run)
    }

    fn reset(&mut self) {
        self.item_cursor = 0;
        self.item_progress = 0;
        self.item_size = 0;
        self.start_time = None;
        self.status = None;
    }

    fn deps<'a>(&'a self, task_run: &'a mut TaskRun) -> TaskDeps<'a> {
        TaskDeps {
            runner: self,
            task_run,
        }
    }

    async fn enqueue<T: MaintenanceTask>(&mut self, task: &T) -> Result<TaskRun, StoreError> {
        self.logger.info(&format!("{} enqueuing...", task.name()));
        debug!(
            runner_id = %self.id,
            task = task.name(),
            task_id = task.id().unwrap_or_default(),
            description = task.description().unwrap_or_default(),
            source_len = task.source().map(str::len).unwrap_or_default(),
            "Creating task run"
        );

        let task_run = self
            .store
            .create(TaskRunCreateInput {
                started_at: self.clock.timestamp(),
                status: Status::Enqueued,
                task_name: task.name().to_string(),
            })
            .await?;

        self.status = Some(Status::Enqueued);
        Ok(task_run)
    }

    async fn execute<T: MaintenanceTask>(
        &mut self,
        task: &T,
        task_run: &mut TaskRun,
    ) -> Result<(), TaskError> {
        let items = task.collection(self.deps(task_run)).await?;
        self.item_size = items.len();

        self.logger.info(&format!(
            "{} collected {} records",
            task.name(),
            self.item_size
        ));

        self.persist(task_run).await?;
        self.process(task, task_run, items).await
    }

    async fn process<T: MaintenanceTask>(
        &mut self,
        task: &T,
        task_run: &mut TaskRun,
        items: Vec<T::Entity>,
    ) -> Result<(), TaskError> {
        for (index, item) in items.into_iter().enumerate() {
            self.item_cursor = index + 1;

            task.process(self.deps(task_run), item).await?;

            task_run.time_running = Some(self.time_running());
            self.item_progress = progress_percent(self.item_cursor, self.item_size);

            self.logger.info(&format!(
                "{} processed {}/{} records",
                task.name(),
                self.item_cursor,
                self.item_size
            ));
        }

        Ok(())
    }

    async fn complete<T: MaintenanceTask>(
        &mut self,
        task: &T,
        task_run: &mut TaskRun,
    ) -> Result<(), StoreError> {
        self.logger.info(&format!(
            "{} completed in {}ms",
            task.name(),
            self.time_running()
        ));

        task_run.ended_at = Some(self.clock.timestamp());
        task_run.status = Status::Succeeded;
        task_run.time_running = Some(self.time_running());
        self.status = Some(Status::Succeeded);

        self.persist(task_run).await
    }

    async fn fail<T: MaintenanceTask>(
        &mut self,
        task: &T,
        task_run: &mut TaskRun,
        err: TaskError,
    ) -> Result<(), StoreError> {
        self.logger.error(&format!("{} failed", task.name()), &err);

        task_run.record_error(ErrorAttributes::from(&err));
        task_run.ended_at = Some(self.clock.timestamp());
        task_run.status = Status::Failed;
        task_run.time_running = Some(self.time_running());
        self.status = Some(Status::Failed);

        self.persist(task_run).await
    }

    async fn persist(&self, task_run: &TaskRun) -> Result<(), StoreError> {
        debug!(
            runner_id = %self.id,
            run_id = %task_run.id,
            task = %task_run.task_name,
            status = %task_run.status,
            "Persisting task run"
        );
        self.store.update(task_run).await
    }
}

/// Whole hundreds of `cursor` over `size`: 0 until every item is done, then 100.
/// A zero size yields 0.
fn progress_percent(cursor: usize, size: usize) -> u8 {
    if size == 0 {
        return 0;
    }
    ((cursor.min(size) / size) * 100) as u8
}

/// Builder for constructing a Runner.
pub struct RunnerBuilder {
    store: Arc<dyn TaskRunStore>,
    generate_id: Option<GenerateIdFn>,
    logger: Arc<dyn RunLogger>,
    clock: Arc<dyn Clock>,
}

impl RunnerBuilder {
    /// Create a new builder with the given store.
    pub fn new(store: impl TaskRunStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            generate_id: None,
            logger: Arc::new(NoopLogger),
            clock: Arc::new(SystemClock),
        }
    }

    /// Set the function producing the runner id. Defaults to a random UUID.
    pub fn generate_id<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String + Send + 'static,
    {
        self.generate_id = Some(Box::new(f));
        self
    }

    /// Set the logger. Defaults to [`NoopLogger`].
    pub fn logger(mut self, logger: impl RunLogger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Set the clock. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Build the runner. The id generator is called here, once.
    pub fn build(self) -> Runner {
        let id = match self.generate_id {
            Some(generate_id) => generate_id(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        Runner {
            id,
            item_cursor: 0,
            item_progress: 0,
            item_size: 0,
            start_time: None,
            status: None,
            store: self.store,
            logger: self.logger,
            clock: self.clock,
        }
    }
}
