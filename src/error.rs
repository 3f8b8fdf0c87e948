//! Error types for tasks and run stores.

use std::borrow::Cow;
use thiserror::Error;

/// Error type for run store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("task run not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Error raised while collecting or processing a task's items.
///
/// The runner never propagates this to its caller. It is recorded on the
/// task run through [`ErrorAttributes`](crate::ErrorAttributes).
#[derive(Error, Debug)]
pub enum TaskError {
    /// A named failure with a source error.
    #[error("{source}")]
    Failed {
        name: Cow<'static, str>,
        #[source]
        source: anyhow::Error,
    },

    /// A bare message with no name or stack.
    #[error("{0}")]
    Message(String),
}

impl TaskError {
    /// Create a failure named `Error`.
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        Self::named("Error", err)
    }

    /// Create a failure with a custom name.
    pub fn named(name: impl Into<Cow<'static, str>>, err: impl Into<anyhow::Error>) -> Self {
        Self::Failed {
            name: name.into(),
            source: err.into(),
        }
    }

    /// Create a bare message failure.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Returns the failure name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Failed { name, .. } => Some(name.as_ref()),
            Self::Message(_) => None,
        }
    }
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(err)
    }
}

impl From<StoreError> for TaskError {
    fn from(err: StoreError) -> Self {
        Self::named("StoreError", err)
    }
}
