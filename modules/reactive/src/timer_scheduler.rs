//! Tokio-backed timer scheduler used for delayed emission.

use core::time::Duration;
use std::{
  panic::{self, AssertUnwindSafe},
  sync::{Arc, Mutex, MutexGuard, OnceLock},
  time::Instant,
};

use tokio::{
  runtime::{Builder, Handle, Runtime},
  sync::Notify,
};
use tracing::{debug, error};

use crate::{
  ScheduledTask, SchedulerConfig, SchedulerError, TaskId, TimerTask,
  fn_task::FnTask,
  stage_guard::panic_message,
  timer_queue::{BoxedTask, TimerQueue},
};


static SHARED_SCHEDULER: OnceLock<Result<TimerScheduler, SchedulerError>> = OnceLock::new();

/// Runs callbacks after a delay on a background Tokio runtime.
///
/// A single timer loop pops due tasks in deadline order (ties in scheduling order) and hands each
/// one to the runtime's blocking pool, so a slow task never delays another task's deadline.
/// Cloning yields another handle to the same scheduler; the runtime shuts down when the last
/// handle is dropped or [`TimerScheduler::shutdown`] is called.
#[derive(Clone)]
pub struct TimerScheduler {
  shared: Arc<SchedulerShared>,
  _guard: Arc<RuntimeGuard>,
}

pub(crate) struct SchedulerShared {
  queue:  Mutex<TimerQueue>,
  wakeup: Notify,
  config: SchedulerConfig,
}

struct RuntimeGuard {
  shared:  Arc<SchedulerShared>,
  runtime: Option<Runtime>,
}

impl TimerScheduler {
  /// Creates a scheduler owning a dedicated multi-thread runtime.
  ///
  /// # Errors
  ///
  /// Returns [`SchedulerError::Runtime`] when the runtime cannot be built.
  pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
    let runtime = Builder::new_multi_thread()
      .worker_threads(config.worker_threads())
      .thread_name(config.thread_name())
      .enable_time()
      .build()
      .map_err(|error| SchedulerError::Runtime(error.to_string()))?;
    let shared = Arc::new(SchedulerShared::new(config));
    runtime.spawn(run_timer_loop(shared.clone()));
    debug!(worker_threads = config.worker_threads(), thread_name = config.thread_name(), "timer scheduler started");
    Ok(Self { shared: shared.clone(), _guard: Arc::new(RuntimeGuard { shared, runtime: Some(runtime) }) })
  }

  /// Creates a scheduler whose timer loop runs on an existing runtime.
  ///
  /// The runtime must have its time driver enabled. `worker_threads` and `thread_name` of the
  /// configuration are ignored.
  #[must_use]
  pub fn with_handle(handle: &Handle, config: SchedulerConfig) -> Self {
    let shared = Arc::new(SchedulerShared::new(config));
    handle.spawn(run_timer_loop(shared.clone()));
    debug!("timer scheduler started on provided runtime");
    Self { shared: shared.clone(), _guard: Arc::new(RuntimeGuard { shared, runtime: None }) }
  }

  /// Returns the process-wide scheduler, creating it with the default configuration on first use.
  ///
  /// # Errors
  ///
  /// Returns the error recorded when the shared runtime could not be built.
  pub fn shared() -> Result<Self, SchedulerError> {
    SHARED_SCHEDULER.get_or_init(|| Self::new(SchedulerConfig::default())).clone()
  }

  /// Schedules `task` to run once after `delay`.
  ///
  /// # Errors
  ///
  /// Returns [`SchedulerError::Closed`] after shutdown, [`SchedulerError::CapacityExceeded`] when
  /// the pending task limit is reached and [`SchedulerError::InvalidDelay`] when the deadline
  /// overflows. The rejected task is dropped without being aborted.
  pub fn schedule_once<T>(&self, delay: Duration, task: T) -> Result<ScheduledTask, SchedulerError>
  where
    T: TimerTask, {
    let Some(deadline) = Instant::now().checked_add(delay) else {
      return Err(SchedulerError::InvalidDelay);
    };
    let mut queue = self.shared.lock_queue();
    if let Err(error) = queue.admit() {
      drop(queue);
      drop(task);
      return Err(error);
    }
    let id = queue.insert(deadline, Box::new(task));
    drop(queue);
    self.shared.wakeup.notify_one();
    Ok(ScheduledTask::new(id, Arc::downgrade(&self.shared)))
  }

  /// Schedules a closure to run once after `delay`.
  ///
  /// # Errors
  ///
  /// See [`TimerScheduler::schedule_once`].
  pub fn schedule_fn<F>(&self, delay: Duration, func: F) -> Result<ScheduledTask, SchedulerError>
  where
    F: FnOnce() + Send + 'static, {
    self.schedule_once(delay, FnTask::new(func))
  }

  /// Returns the number of tasks waiting for their deadline.
  #[must_use]
  pub fn pending_tasks(&self) -> usize {
    self.shared.lock_queue().len()
  }

  /// Returns the configuration used to build this scheduler.
  #[must_use]
  pub fn config(&self) -> SchedulerConfig {
    self.shared.config
  }

  /// Stops accepting tasks and aborts every pending one with [`SchedulerError::Closed`].
  pub fn shutdown(&self) {
    self.shared.close();
  }

  /// Returns `true` once the scheduler no longer accepts tasks.
  #[must_use]
  pub fn is_shutdown(&self) -> bool {
    self.shared.lock_queue().is_closed()
  }
}

impl SchedulerShared {
  fn new(config: SchedulerConfig) -> Self {
    Self { queue: Mutex::new(TimerQueue::new(config.max_pending_tasks())), wakeup: Notify::new(), config }
  }

  fn lock_queue(&self) -> MutexGuard<'_, TimerQueue> {
    match self.queue.lock() {
      | Ok(guard) => guard,
      | Err(poisoned) => poisoned.into_inner(),
    }
  }

  pub(crate) fn cancel(&self, id: TaskId) -> bool {
    let removed = self.lock_queue().cancel(id);
    // タスクのドロップはロック外で行う
    removed.is_some()
  }

  fn close(&self) {
    let drained = {
      let mut queue = self.lock_queue();
      if queue.is_closed() {
        return;
      }
      queue.close()
    };
    self.wakeup.notify_one();
    debug!(aborted = drained.len(), "timer scheduler shut down");
    for (id, task) in drained {
      guard_task(id, move || task.abort(SchedulerError::Closed));
    }
  }
}

impl Drop for RuntimeGuard {
  fn drop(&mut self) {
    self.shared.close();
    if let Some(runtime) = self.runtime.take() {
      runtime.shutdown_background();
    }
  }
}

async fn run_timer_loop(shared: Arc<SchedulerShared>) {
  loop {
    let (due, next_deadline) = {
      let mut queue = shared.lock_queue();
      if queue.is_closed() {
        return;
      }
      let due = queue.pop_due(Instant::now());
      (due, queue.next_deadline())
    };
    if !due.is_empty() {
      run_due(due);
      continue;
    }
    match next_deadline {
      | Some(deadline) => {
        tokio::select! {
          () = tokio::time::sleep_until(deadline.into()) => {},
          () = shared.wakeup.notified() => {},
        }
      },
      | None => shared.wakeup.notified().await,
    }
  }
}

fn run_due(due: Vec<(TaskId, BoxedTask)>) {
  for (id, task) in due {
    drop(tokio::task::spawn_blocking(move || guard_task(id, move || task.run())));
  }
}

fn guard_task<F>(id: TaskId, body: F)
where
  F: FnOnce(), {
  if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(body)) {
    error!(task = id.raw(), message = %panic_message(payload.as_ref()), "scheduled task panicked");
  }
}
