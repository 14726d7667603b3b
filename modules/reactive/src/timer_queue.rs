//! Deadline-ordered queue of pending timer tasks.

use core::cmp::Reverse;
use std::{collections::BinaryHeap, time::Instant};

use hashbrown::HashMap;

use crate::{SchedulerError, TaskId, TimerTask};


pub(crate) type BoxedTask = Box<dyn TimerTask>;

const COMPACTION_FLOOR: usize = 32;

/// Pending tasks keyed by deadline, ties resolved by scheduling order.
///
/// Cancelled entries stay in the heap and are skipped lazily once they reach the top. The heap is
/// rebuilt when stale entries outnumber live ones.
pub(crate) struct TimerQueue {
  heap:              BinaryHeap<Reverse<TimerKey>>,
  tasks:             HashMap<TaskId, BoxedTask>,
  next_id:           u64,
  max_pending_tasks: usize,
  closed:            bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TimerKey {
  deadline: Instant,
  id:       TaskId,
}

impl TimerQueue {
  pub(crate) fn new(max_pending_tasks: usize) -> Self {
    Self { heap: BinaryHeap::new(), tasks: HashMap::new(), next_id: 1, max_pending_tasks, closed: false }
  }

  /// Checks whether one more task would be accepted.
  pub(crate) fn admit(&self) -> Result<(), SchedulerError> {
    if self.closed {
      return Err(SchedulerError::Closed);
    }
    if self.tasks.len() >= self.max_pending_tasks {
      return Err(SchedulerError::CapacityExceeded);
    }
    Ok(())
  }

  /// Inserts a task. Callers must have checked [`TimerQueue::admit`] under the same lock.
  pub(crate) fn insert(&mut self, deadline: Instant, task: BoxedTask) -> TaskId {
    let id = TaskId::new(self.next_id);
    self.next_id = self.next_id.wrapping_add(1);
    self.heap.push(Reverse(TimerKey { deadline, id }));
    self.tasks.insert(id, task);
    id
  }

  /// Removes a pending task, returning it so the caller can drop it outside the lock.
  pub(crate) fn cancel(&mut self, id: TaskId) -> Option<BoxedTask> {
    let removed = self.tasks.remove(&id);
    if removed.is_some() && self.heap.len() > COMPACTION_FLOOR && self.heap.len() > self.tasks.len() * 2 {
      self.compact();
    }
    removed
  }

  fn compact(&mut self) {
    let tasks = &self.tasks;
    self.heap.retain(|Reverse(key)| tasks.contains_key(&key.id));
  }

  /// Pops every task whose deadline is not after `now`, earliest first.
  pub(crate) fn pop_due(&mut self, now: Instant) -> Vec<(TaskId, BoxedTask)> {
    let mut due = Vec::new();
    while let Some(Reverse(key)) = self.heap.peek().copied() {
      if key.deadline > now {
        break;
      }
      self.heap.pop();
      if let Some(task) = self.tasks.remove(&key.id) {
        due.push((key.id, task));
      }
    }
    due
  }

  /// Returns the earliest deadline among live tasks.
  pub(crate) fn next_deadline(&mut self) -> Option<Instant> {
    while let Some(Reverse(key)) = self.heap.peek().copied() {
      if self.tasks.contains_key(&key.id) {
        return Some(key.deadline);
      }
      self.heap.pop();
    }
    None
  }

  /// Closes the queue and hands back every pending task in deadline order.
  pub(crate) fn close(&mut self) -> Vec<(TaskId, BoxedTask)> {
    self.closed = true;
    let mut drained = Vec::with_capacity(self.tasks.len());
    while let Some(Reverse(key)) = self.heap.pop() {
      if let Some(task) = self.tasks.remove(&key.id) {
        drained.push((key.id, task));
      }
    }
    drained
  }

  pub(crate) const fn is_closed(&self) -> bool {
    self.closed
  }

  pub(crate) fn len(&self) -> usize {
    self.tasks.len()
  }
}
