use std::sync::Arc;

use hashbrown::HashMap;
use spin::Mutex;
use tracing::debug;

use crate::{ScheduledTask, SubscriptionId, SubscriptionState, TaskId};


/// State shared by every stage of one subscription run.
///
/// Owns the terminal-state flag and the scheduled tasks still pending for the run. The first
/// transition out of [`SubscriptionState::Active`] wins; later ones are ignored.
#[derive(Clone)]
pub(crate) struct SubscriptionContext {
  id:    SubscriptionId,
  inner: Arc<Mutex<ContextState>>,
}

struct ContextState {
  state: SubscriptionState,
  tasks: HashMap<TaskId, ScheduledTask>,
}

impl SubscriptionContext {
  pub(crate) fn new() -> Self {
    let inner = ContextState { state: SubscriptionState::Active, tasks: HashMap::new() };
    Self { id: SubscriptionId::next(), inner: Arc::new(Mutex::new(inner)) }
  }

  pub(crate) const fn id(&self) -> SubscriptionId {
    self.id
  }

  pub(crate) fn state(&self) -> SubscriptionState {
    self.inner.lock().state
  }

  pub(crate) fn is_active(&self) -> bool {
    self.state() == SubscriptionState::Active
  }

  /// Moves the run into `target`, cancelling every pending task.
  ///
  /// Returns `false` when the run already reached a terminal state.
  pub(crate) fn terminate(&self, target: SubscriptionState) -> bool {
    debug_assert!(target.is_terminal());
    let released = {
      let mut guard = self.inner.lock();
      if guard.state.is_terminal() {
        return false;
      }
      guard.state = target;
      core::mem::take(&mut guard.tasks)
    };
    debug!(subscription = self.id.raw(), state = ?target, released = released.len(), "subscription terminated");
    for task in released.into_values() {
      task.cancel();
    }
    true
  }

  /// Records a pending task. Cancels it immediately when the run is no longer active.
  pub(crate) fn track(&self, task: ScheduledTask) {
    let rejected = {
      let mut guard = self.inner.lock();
      if guard.state.is_terminal() {
        Some(task)
      } else {
        guard.tasks.insert(task.id(), task);
        None
      }
    };
    if let Some(task) = rejected {
      task.cancel();
    }
  }

  /// Forgets a task that has fired.
  pub(crate) fn untrack(&self, id: TaskId) {
    self.inner.lock().tasks.remove(&id);
  }

  pub(crate) fn pending_tasks(&self) -> usize {
    self.inner.lock().tasks.len()
  }
}
