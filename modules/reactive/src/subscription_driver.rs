use std::sync::{Arc, Mutex, MutexGuard};

use tracing::trace;

use crate::{
  Signal, Subscriber, Subscription, SubscriptionState,
  observer::Observer,
  publisher::PublisherRef,
  stage_guard::guard_stage,
  subscription_context::SubscriptionContext,
};


/// Terminal stage delivering signals to a [`Subscriber`] while enforcing the terminal-once rule.
///
/// Every callback runs under the subscriber lock and re-checks the run state after acquiring it,
/// so a value racing with a terminal signal from another thread is either delivered before the
/// terminal callback or dropped.
pub(crate) struct SubscriptionDriver<S> {
  context:    SubscriptionContext,
  subscriber: Mutex<S>,
}

impl<S> SubscriptionDriver<S> {
  /// Creates a fresh run of `publisher` delivering into `subscriber`.
  ///
  /// Stages without a delay run to completion on the calling thread before this returns.
  pub(crate) fn start<T>(publisher: &PublisherRef<T>, subscriber: S) -> Subscription
  where
    T: Send + 'static,
    S: Subscriber<T>, {
    let context = SubscriptionContext::new();
    trace!(subscription = context.id().raw(), "subscription started");
    let driver = Arc::new(Self { context: context.clone(), subscriber: Mutex::new(subscriber) });
    publisher.subscribe(&context, driver);
    Subscription::new(context)
  }

  fn lock_subscriber(&self) -> MutexGuard<'_, S> {
    match self.subscriber.lock() {
      | Ok(guard) => guard,
      | Err(poisoned) => poisoned.into_inner(),
    }
  }
}

impl<T, S> Observer<T> for SubscriptionDriver<S>
where
  T: Send + 'static,
  S: Subscriber<T>,
{
  fn on_signal(&self, signal: Signal<T>) {
    let mut subscriber = self.lock_subscriber();
    match signal {
      | Signal::Next(value) => {
        if !self.context.is_active() {
          trace!(subscription = self.context.id().raw(), "dropping value after terminal state");
          return;
        }
        // on_next のパニックは Errored として on_error に回す
        let Err(fault) = guard_stage("subscriber", || subscriber.on_next(value)) else {
          return;
        };
        if self.context.terminate(SubscriptionState::Errored) {
          subscriber.on_error(fault);
        }
      },
      | Signal::Complete => {
        if self.context.terminate(SubscriptionState::Completed) {
          subscriber.on_complete();
        }
      },
      | Signal::Error(error) => {
        if self.context.terminate(SubscriptionState::Errored) {
          subscriber.on_error(error);
        }
      },
    }
  }
}
