//! Scheduler error types returned by public APIs.

/// Errors raised when scheduling requests fail.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SchedulerError {
  /// Delay overflowed the supported range.
  #[error("invalid delay")]
  InvalidDelay,
  /// Scheduler has been shut down and no longer accepts tasks.
  #[error("scheduler closed")]
  Closed,
  /// Pending task table reached the configured capacity.
  #[error("scheduler capacity exceeded")]
  CapacityExceeded,
  /// The backing runtime could not be created.
  #[error("scheduler runtime unavailable: {0}")]
  Runtime(String),
}
