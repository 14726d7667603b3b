//! Delay operator stage.

use core::time::Duration;
use std::{
  collections::VecDeque,
  sync::{Arc, Mutex as StdMutex, MutexGuard, Weak},
};

use portable_atomic::{AtomicBool, Ordering};
use spin::Mutex;
use tracing::{trace, warn};

use crate::{
  SchedulerError, Signal, StreamError, TaskId, TimerScheduler, TimerTask,
  observer::{Observer, ObserverRef},
  publisher::{Publisher, PublisherRef},
  subscription_context::SubscriptionContext,
};

#[cfg(test)]
mod tests;

/// Stage re-emitting every value after a fixed delay.
///
/// At most one timer is in flight per run: the timer of the next value is armed only after the
/// previous value was delivered, so values come out in order and evenly spaced. Downstream
/// signals are serialized through the delivery lock, so a failure never overtakes a value that is
/// being delivered.
pub(crate) struct DelayPublisher<T> {
  upstream:  PublisherRef<T>,
  delay:     Duration,
  scheduler: Option<TimerScheduler>,
}

struct DelayObserver<T> {
  this:       Weak<DelayObserver<T>>,
  context:    SubscriptionContext,
  scheduler:  TimerScheduler,
  delay:      Duration,
  downstream: ObserverRef<T>,
  terminated: AtomicBool,
  delivery:   StdMutex<()>,
  state:      Mutex<DelayState<T>>,
}

struct DelayState<T> {
  queue:     VecDeque<T>,
  armed:     bool,
  in_flight: Option<TaskId>,
  completed: bool,
}

/// Timer task delivering the head of the queue.
struct DelayedEmission<T> {
  observer: Arc<DelayObserver<T>>,
}

impl<T> DelayPublisher<T>
where
  T: Send + 'static,
{
  /// `scheduler` of `None` resolves the shared scheduler when a run starts.
  pub(crate) const fn new(upstream: PublisherRef<T>, delay: Duration, scheduler: Option<TimerScheduler>) -> Self {
    Self { upstream, delay, scheduler }
  }
}

impl<T> Publisher<T> for DelayPublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, context: &SubscriptionContext, downstream: ObserverRef<T>) {
    let resolved = match &self.scheduler {
      | Some(scheduler) => Ok(scheduler.clone()),
      | None => TimerScheduler::shared(),
    };
    let scheduler = match resolved {
      | Ok(scheduler) => scheduler,
      | Err(error) => {
        warn!(subscription = context.id().raw(), %error, "no scheduler available for delayed emission");
        downstream.on_signal(Signal::Error(error.into()));
        return;
      },
    };
    let observer = Arc::new_cyclic(|this| DelayObserver {
      this: this.clone(),
      context: context.clone(),
      scheduler,
      delay: self.delay,
      downstream,
      terminated: AtomicBool::new(false),
      delivery: StdMutex::new(()),
      state: Mutex::new(DelayState { queue: VecDeque::new(), armed: false, in_flight: None, completed: false }),
    });
    self.upstream.subscribe(context, observer);
  }
}

impl<T> DelayObserver<T>
where
  T: Send + 'static,
{
  fn is_terminated(&self) -> bool {
    self.terminated.load(Ordering::Acquire)
  }

  /// Arms the timer for the head of the queue. Called with the state lock held.
  fn arm(&self, state: &mut DelayState<T>) -> Result<(), StreamError> {
    let Some(observer) = self.this.upgrade() else {
      return Ok(());
    };
    let task = self.scheduler.schedule_once(self.delay, DelayedEmission { observer })?;
    state.armed = true;
    state.in_flight = Some(task.id());
    self.context.track(task);
    Ok(())
  }

  /// Delivers the head of the queue, then re-arms or forwards a pending completion.
  fn fire(&self) {
    let value = {
      let mut state = self.state.lock();
      if let Some(id) = state.in_flight.take() {
        self.context.untrack(id);
      }
      if self.is_terminated() {
        return;
      }
      state.queue.pop_front()
    };
    if let Some(value) = value {
      let _delivery = self.lock_delivery();
      if self.is_terminated() || !self.context.is_active() {
        return;
      }
      trace!(subscription = self.context.id().raw(), "emitting delayed value");
      // 下流のパニックはタイマータスクとして記録される
      self.downstream.on_signal(Signal::Next(value));
    }

    let rearmed = {
      let mut state = self.state.lock();
      if self.is_terminated() {
        return;
      }
      if state.queue.is_empty() {
        state.armed = false;
        Ok(state.completed)
      } else {
        self.arm(&mut state).map(|()| false)
      }
    };
    match rearmed {
      | Ok(true) => self.complete(),
      | Ok(false) => {},
      | Err(error) => self.fail(error),
    }
  }

  fn complete(&self) {
    let _delivery = self.lock_delivery();
    if !self.terminated.swap(true, Ordering::AcqRel) {
      self.downstream.on_signal(Signal::Complete);
    }
  }

  /// Drops queued values and forwards `error`. Only the first failure is forwarded.
  fn fail(&self, error: StreamError) {
    let _delivery = self.lock_delivery();
    if self.terminated.swap(true, Ordering::AcqRel) {
      return;
    }
    self.state.lock().queue.clear();
    self.downstream.on_signal(Signal::Error(error));
  }

  fn lock_delivery(&self) -> MutexGuard<'_, ()> {
    match self.delivery.lock() {
      | Ok(guard) => guard,
      | Err(poisoned) => poisoned.into_inner(),
    }
  }
}

impl<T> Observer<T> for DelayObserver<T>
where
  T: Send + 'static,
{
  fn on_signal(&self, signal: Signal<T>) {
    if self.is_terminated() {
      return;
    }
    match signal {
      | Signal::Next(value) => {
        let armed = {
          let mut state = self.state.lock();
          state.queue.push_back(value);
          if state.armed { Ok(()) } else { self.arm(&mut state) }
        };
        if let Err(error) = armed {
          self.fail(error);
        }
      },
      | Signal::Complete => {
        let forward_now = {
          let mut state = self.state.lock();
          state.completed = true;
          !state.armed
        };
        if forward_now {
          self.complete();
        }
      },
      | Signal::Error(error) => self.fail(error),
    }
  }
}

impl<T> TimerTask for DelayedEmission<T>
where
  T: Send + 'static,
{
  fn run(self: Box<Self>) {
    self.observer.fire();
  }

  fn abort(self: Box<Self>, reason: SchedulerError) {
    warn!(subscription = self.observer.context.id().raw(), %reason, "delayed emission discarded by scheduler");
    self.observer.fail(reason.into());
  }
}
