//! Timer task trait.

use crate::SchedulerError;

/// Work item executed by a [`TimerScheduler`](crate::TimerScheduler) once its delay elapsed.
pub trait TimerTask: Send + 'static {
  /// Runs the task on the scheduler's execution context.
  fn run(self: Box<Self>);

  /// Called instead of [`TimerTask::run`] when the scheduler discards the task before it fired.
  ///
  /// Cancelled tasks are dropped without calling this method.
  fn abort(self: Box<Self>, _reason: SchedulerError) {}
}
