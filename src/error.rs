//! Error types used by the parcelvisor runtime.
//!
//! - [`RuntimeError`] - fatal failures of a run (setup or lost supervisor).
//! - [`QueueError`] - work-queue retrieval outcomes that carry no item.
//! - [`ReportError`] - the report channel's reading end is gone.
//! - [`ConfigError`] - invalid or unparsable configuration.
//!
//! `RuntimeError` and `QueueError` provide `as_label` for logs/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by a simulation run.
///
/// None of these are retried: a run either completes its shutdown sequence or
/// fails during setup.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration rejected before anything was spawned.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The work queue refused an item.
    #[error("work queue unavailable: {0}")]
    Queue(#[from] QueueError),

    /// The supervisor task ended abnormally (panic or abort) before confirming close.
    #[error("supervisor lost: {reason}")]
    SupervisorLost {
        /// Join failure description.
        reason: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use parcelvisor::{ConfigError, RuntimeError};
    ///
    /// let err = RuntimeError::from(ConfigError::NoWorkers);
    /// assert_eq!(err.as_label(), "runtime_invalid_config");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::InvalidConfig(_) => "runtime_invalid_config",
            RuntimeError::Queue(_) => "runtime_queue",
            RuntimeError::SupervisorLost { .. } => "runtime_supervisor_lost",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::InvalidConfig(e) => format!("config: {e}"),
            RuntimeError::Queue(e) => format!("queue: {e}"),
            RuntimeError::SupervisorLost { reason } => format!("supervisor lost: {reason}"),
        }
    }
}

/// # Work-queue retrieval without an item.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Nothing arrived within the wait; the queue is most likely drained.
    #[error("queue empty after {timeout:?}")]
    Empty {
        /// How long the caller waited.
        timeout: Duration,
    },

    /// The queue was closed and holds no more items.
    #[error("queue closed")]
    Closed,
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Empty { .. } => "queue_empty",
            QueueError::Closed => "queue_closed",
        }
    }
}

/// # Report channel write failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// The supervisor's reading end has been dropped.
    #[error("report channel closed")]
    Closed,
}

/// # Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The pool must have at least one worker.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// Service-time range is inverted.
    #[error("service time range is empty: min {min:?} > max {max:?}")]
    InvalidServiceTime {
        /// Lower bound.
        min: Duration,
        /// Upper bound.
        max: Duration,
    },

    /// An override could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Parse {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}
