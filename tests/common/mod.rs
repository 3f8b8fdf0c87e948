//! Shared test doubles: an in-memory store, a recording logger, and a list task.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use janitor::{
    ManualClock, MaintenanceTask, RunLogger, StoreError, TaskDeps, TaskError, TaskRun,
    TaskRunCreateInput, TaskRunStore,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
struct StoreState {
    creates: Vec<TaskRunCreateInput>,
    updates: Vec<TaskRun>,
    next_id: u64,
}

/// In-memory store recording every call, with failure injection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
    fail_create: bool,
    /// 1-based update call that fails.
    fail_update_on: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn failing_update_on(call: usize) -> Self {
        Self {
            fail_update_on: Some(call),
            ..Self::default()
        }
    }

    pub async fn creates(&self) -> Vec<TaskRunCreateInput> {
        self.state.lock().await.creates.clone()
    }

    pub async fn updates(&self) -> Vec<TaskRun> {
        self.state.lock().await.updates.clone()
    }
}

#[async_trait]
impl TaskRunStore for MemoryStore {
    async fn create(&self, input: TaskRunCreateInput) -> Result<TaskRun, StoreError> {
        if self.fail_create {
            return Err(StoreError::Storage("connection refused".to_string()));
        }

        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = format!("run-{}", state.next_id);
        state.creates.push(input.clone());
        Ok(TaskRun::from_input(id, input, Utc::now()))
    }

    async fn update(&self, run: &TaskRun) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let known = (1..=state.next_id).any(|n| run.id == format!("run-{n}"));
        if !known {
            return Err(StoreError::NotFound(run.id.clone()));
        }

        let call = state.updates.len() + 1;
        let mut stored = run.clone();
        stored.updated_at = Utc::now();
        state.updates.push(stored);

        if self.fail_update_on == Some(call) {
            return Err(StoreError::Storage(format!("update {call} rejected")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Info(String),
    Error { message: String, error: String },
}

/// Logger keeping every line in memory.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    lines: Arc<std::sync::Mutex<Vec<LogLine>>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap().clone()
    }
}

impl RunLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(LogLine::Info(message.to_string()));
    }

    fn error(&self, message: &str, error: &TaskError) {
        self.lines.lock().unwrap().push(LogLine::Error {
            message: message.to_string(),
            error: error.to_string(),
        });
    }
}

/// How a [`ListTask`] fails.
#[derive(Clone)]
pub enum Failure {
    /// `TaskError::new(anyhow!(message))`.
    Error(&'static str),
    /// `TaskError::msg(message)`.
    Message(&'static str),
}

impl Failure {
    fn to_error(&self) -> TaskError {
        match self {
            Self::Error(message) => TaskError::new(anyhow::anyhow!(*message)),
            Self::Message(message) => TaskError::msg(*message),
        }
    }
}

/// What the task observed when `process` was called.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub item: String,
    pub cursor: usize,
    pub size: usize,
    pub time_running: f64,
}

/// Task over a fixed list of strings.
#[derive(Clone)]
pub struct ListTask {
    pub name: &'static str,
    pub items: Vec<String>,
    pub fail_collection: Option<Failure>,
    pub fail_on: Option<(&'static str, Failure)>,
    /// Advanced by `step` on every processed item.
    pub clock: Option<(Arc<ManualClock>, Duration)>,
    pub observed: Arc<Mutex<Vec<Observation>>>,
}

impl ListTask {
    pub fn new(name: &'static str, items: &[&str]) -> Self {
        Self {
            name,
            items: items.iter().map(|s| s.to_string()).collect(),
            fail_collection: None,
            fail_on: None,
            clock: None,
            observed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn fail_on(mut self, item: &'static str, failure: Failure) -> Self {
        self.fail_on = Some((item, failure));
        self
    }

    pub fn fail_collection(mut self, failure: Failure) -> Self {
        self.fail_collection = Some(failure);
        self
    }

    pub fn ticking(mut self, clock: Arc<ManualClock>, step: Duration) -> Self {
        self.clock = Some((clock, step));
        self
    }

    pub async fn observed(&self) -> Vec<Observation> {
        self.observed.lock().await.clone()
    }

    pub async fn processed(&self) -> Vec<String> {
        self.observed().await.into_iter().map(|o| o.item).collect()
    }
}

#[async_trait]
impl MaintenanceTask for ListTask {
    type Entity = String;

    fn name(&self) -> &str {
        self.name
    }

    async fn collection(&self, _deps: TaskDeps<'_>) -> Result<Vec<String>, TaskError> {
        if let Some(failure) = &self.fail_collection {
            return Err(failure.to_error());
        }
        Ok(self.items.clone())
    }

    async fn process(&self, deps: TaskDeps<'_>, item: String) -> Result<(), TaskError> {
        self.observed.lock().await.push(Observation {
            item: item.clone(),
            cursor: deps.runner.item_cursor(),
            size: deps.runner.item_size(),
            time_running: deps.runner.time_running(),
        });

        if let Some((clock, step)) = &self.clock {
            clock.advance(*step);
        }

        match &self.fail_on {
            Some((target, failure)) if *target == item => Err(failure.to_error()),
            _ => Ok(()),
        }
    }
}
