//! Handle of a task registered with a [`TimerScheduler`](crate::TimerScheduler).

use std::sync::Weak;

use crate::{TaskId, timer_scheduler::SchedulerShared};

/// Cancellable handle of a pending timer task.
///
/// Dropping the handle does not cancel the task.
#[derive(Clone)]
pub struct ScheduledTask {
  id:        TaskId,
  scheduler: Weak<SchedulerShared>,
}

impl ScheduledTask {
  pub(crate) const fn new(id: TaskId, scheduler: Weak<SchedulerShared>) -> Self {
    Self { id, scheduler }
  }

  /// Returns the task identifier.
  #[must_use]
  pub const fn id(&self) -> TaskId {
    self.id
  }

  /// Cancels the task if it has not been dequeued yet.
  ///
  /// Returns `true` when the task was still pending and will never run.
  pub fn cancel(&self) -> bool {
    match self.scheduler.upgrade() {
      | Some(scheduler) => scheduler.cancel(self.id),
      | None => false,
    }
  }
}

impl core::fmt::Debug for ScheduledTask {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ScheduledTask").field("id", &self.id).finish_non_exhaustive()
  }
}
