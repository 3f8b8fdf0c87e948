//! Logging capability for the runner.

use crate::error::TaskError;

/// Sink for the runner's progress messages.
pub trait RunLogger: Send + Sync {
    /// Log a progress message.
    fn info(&self, message: &str);

    /// Log a failure together with the error that caused it.
    fn error(&self, message: &str, error: &TaskError);
}

/// A logger that discards all messages.
///
/// Used when no logger is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl RunLogger for NoopLogger {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str, _error: &TaskError) {}
}

/// A logger that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RunLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str, error: &TaskError) {
        tracing::error!(
            error = %error,
            error_name = error.name().unwrap_or_default(),
            "{}",
            message
        );
    }
}
