//! Stream error definitions.

use crate::SchedulerError;


/// Errors carried by [`Signal::Error`](crate::Signal::Error).
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StreamError {
  /// A stage function, predicate, hook or subscriber callback faulted.
  #[error("stage `{stage}` faulted: {message}")]
  StageFault {
    /// Name of the stage that faulted.
    stage:   &'static str,
    /// Description of the fault.
    message: String,
  },
  /// The scheduler could not run a delayed emission.
  #[error("scheduler failure: {0}")]
  Scheduler(#[from] SchedulerError),
  /// The stream was constructed as failed by the caller.
  #[error("stream failed: {0}")]
  Failed(String),
}

impl StreamError {
  /// Creates a [`StreamError::Failed`] with the provided message.
  #[must_use]
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed(message.into())
  }

  pub(crate) fn stage_fault(stage: &'static str, message: impl Into<String>) -> Self {
    Self::StageFault { stage, message: message.into() }
  }

  /// Returns the faulting stage name for [`StreamError::StageFault`].
  #[must_use]
  pub const fn stage(&self) -> Option<&'static str> {
    match self {
      | Self::StageFault { stage, .. } => Some(*stage),
      | _ => None,
    }
  }
}
