//! Task run record and the values derived from it.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, TaskError};
use crate::status::Status;

/// A record of one maintenance task run.
///
/// Owned by the store. The runner mutates it in memory and hands it back
/// through [`TaskRunStore::update`](crate::TaskRunStore::update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRun {
    /// Assigned by the store on creation.
    pub id: String,
    pub task_name: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    /// Set once, on the terminal transition.
    pub ended_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    /// Milliseconds since processing began.
    pub time_running: Option<f64>,
    pub error_message: Option<String>,
    pub error_name: Option<String>,
    pub error_stack: Option<String>,
    /// Free-form data for tasks. Never written by the runner.
    pub metadata: Option<String>,
}

impl TaskRun {
    /// Build a fresh record from a create request.
    pub fn from_input(
        id: impl Into<String>,
        input: TaskRunCreateInput,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            task_name: input.task_name,
            status: input.status,
            created_at,
            started_at: Some(input.started_at),
            ended_at: None,
            updated_at: created_at,
            time_running: None,
            error_message: None,
            error_name: None,
            error_stack: None,
            metadata: None,
        }
    }

    /// Serialize `value` as JSON into `metadata`.
    pub fn set_metadata<T: Serialize>(&mut self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.metadata = Some(json);
        Ok(())
    }

    /// Deserialize `metadata` as JSON. Returns `Ok(None)` when unset.
    pub fn metadata_as<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        self.metadata
            .as_deref()
            .map(serde_json::from_str::<T>)
            .transpose()
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub(crate) fn record_error(&mut self, attrs: ErrorAttributes) {
        self.error_message = attrs.message;
        self.error_name = attrs.name;
        self.error_stack = attrs.stack;
    }
}

/// Input passed to [`TaskRunStore::create`](crate::TaskRunStore::create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRunCreateInput {
    pub started_at: DateTime<Utc>,
    pub status: Status,
    pub task_name: String,
}

/// Error fields recorded on a failed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorAttributes {
    pub message: Option<String>,
    pub name: Option<String>,
    pub stack: Option<String>,
}

impl From<&TaskError> for ErrorAttributes {
    fn from(err: &TaskError) -> Self {
        match err {
            TaskError::Failed { name, source } => Self {
                message: Some(source.to_string()),
                name: Some(name.to_string()),
                stack: Some(format!("{source:?}")),
            },
            // Bare messages still surface as the error message.
            TaskError::Message(message) => Self {
                message: Some(message.clone()),
                name: None,
                stack: None,
            },
        }
    }
}
