//! Scheduler configuration.

#[cfg(test)]
mod tests;

const DEFAULT_THREAD_NAME: &str = "fraktor-reactive-timer";
const DEFAULT_MAX_PENDING_TASKS: usize = 65_536;

/// Configuration for [`TimerScheduler`](crate::TimerScheduler) construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
  worker_threads:    usize,
  thread_name:       &'static str,
  max_pending_tasks: usize,
}

impl SchedulerConfig {
  /// Creates a configuration with one worker thread and the default task limit.
  #[must_use]
  pub const fn new() -> Self {
    Self { worker_threads: 1, thread_name: DEFAULT_THREAD_NAME, max_pending_tasks: DEFAULT_MAX_PENDING_TASKS }
  }

  /// Overrides the number of runtime worker threads. Zero is raised to one.
  #[must_use]
  pub const fn with_worker_threads(mut self, worker_threads: usize) -> Self {
    self.worker_threads = if worker_threads == 0 { 1 } else { worker_threads };
    self
  }

  /// Overrides the name given to runtime worker threads.
  #[must_use]
  pub const fn with_thread_name(mut self, thread_name: &'static str) -> Self {
    self.thread_name = thread_name;
    self
  }

  /// Overrides the maximum number of pending tasks accepted before rejecting new ones.
  #[must_use]
  pub const fn with_max_pending_tasks(mut self, max_pending_tasks: usize) -> Self {
    self.max_pending_tasks = if max_pending_tasks == 0 { 1 } else { max_pending_tasks };
    self
  }

  /// Returns the number of runtime worker threads.
  #[must_use]
  pub const fn worker_threads(&self) -> usize {
    self.worker_threads
  }

  /// Returns the worker thread name.
  #[must_use]
  pub const fn thread_name(&self) -> &'static str {
    self.thread_name
  }

  /// Returns the pending task limit.
  #[must_use]
  pub const fn max_pending_tasks(&self) -> usize {
    self.max_pending_tasks
  }
}

impl Default for SchedulerConfig {
  fn default() -> Self {
    Self::new()
  }
}
