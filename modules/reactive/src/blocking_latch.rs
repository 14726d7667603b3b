use std::sync::{Condvar, Mutex, MutexGuard};

use crate::StreamError;

#[cfg(test)]
mod tests;

/// One-shot handoff between the thread producing a stream's signals and a thread waiting for the
/// stream to terminate.
pub(crate) struct BlockingLatch<T> {
  slot:  Mutex<LatchSlot<T>>,
  ready: Condvar,
}

struct LatchSlot<T> {
  values:  Vec<T>,
  outcome: Option<Result<(), StreamError>>,
}

impl<T> BlockingLatch<T> {
  pub(crate) const fn new() -> Self {
    Self { slot: Mutex::new(LatchSlot { values: Vec::new(), outcome: None }), ready: Condvar::new() }
  }

  pub(crate) fn push(&self, value: T) {
    let mut slot = self.lock_slot();
    if slot.outcome.is_none() {
      slot.values.push(value);
    }
  }

  /// Records the terminal outcome and wakes the waiter. Only the first outcome is kept.
  pub(crate) fn finish(&self, outcome: Result<(), StreamError>) {
    let mut slot = self.lock_slot();
    if slot.outcome.is_some() {
      return;
    }
    slot.outcome = Some(outcome);
    drop(slot);
    self.ready.notify_all();
  }

  /// Blocks until [`BlockingLatch::finish`] was called, then takes the buffered values.
  pub(crate) fn wait(&self) -> Result<Vec<T>, StreamError> {
    let mut slot = self.lock_slot();
    while slot.outcome.is_none() {
      slot = match self.ready.wait(slot) {
        | Ok(guard) => guard,
        | Err(poisoned) => poisoned.into_inner(),
      };
    }
    match slot.outcome.clone() {
      | Some(Ok(())) | None => Ok(core::mem::take(&mut slot.values)),
      | Some(Err(error)) => Err(error),
    }
  }

  fn lock_slot(&self) -> MutexGuard<'_, LatchSlot<T>> {
    match self.slot.lock() {
      | Ok(guard) => guard,
      | Err(poisoned) => poisoned.into_inner(),
    }
  }
}
