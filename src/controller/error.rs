//! Errors surfaced by a running controller.

use crate::builder::error::ConfigError;
use thiserror::Error;

/// Errors raised when a dwell timer cannot be armed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No Tokio runtime was available to host the timer task.
    ///
    /// The controller refuses the transition outright rather than entering a
    /// state whose timeout would never fire.
    #[error("No timer runtime is available. Enter states from inside a Tokio runtime")]
    NoRuntime,
}

/// Errors surfaced by controller operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
