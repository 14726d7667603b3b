use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

use crate::{
  Signal,
  observer::{Observer, ObserverRef},
  publisher::{Publisher, PublisherRef},
  stage_guard::guard_stage,
  subscription_context::SubscriptionContext,
};

const STAGE: &str = "filter";

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Stage forwarding only the values accepted by a predicate.
pub(crate) struct FilterPublisher<T> {
  upstream:  PublisherRef<T>,
  predicate: Predicate<T>,
}

struct FilterObserver<T> {
  predicate:  Predicate<T>,
  downstream: ObserverRef<T>,
  halted:     AtomicBool,
}

impl<T> FilterPublisher<T>
where
  T: Send + 'static,
{
  pub(crate) fn new<P>(upstream: PublisherRef<T>, predicate: P) -> Self
  where
    P: Fn(&T) -> bool + Send + Sync + 'static, {
    Self { upstream, predicate: Arc::new(predicate) }
  }
}

impl<T> Publisher<T> for FilterPublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, context: &SubscriptionContext, downstream: ObserverRef<T>) {
    let observer = FilterObserver { predicate: self.predicate.clone(), downstream, halted: AtomicBool::new(false) };
    self.upstream.subscribe(context, Arc::new(observer));
  }
}

impl<T> Observer<T> for FilterObserver<T>
where
  T: Send + 'static,
{
  fn on_signal(&self, signal: Signal<T>) {
    if self.halted.load(Ordering::Acquire) {
      return;
    }
    match signal {
      | Signal::Next(value) => match guard_stage(STAGE, || (self.predicate)(&value)) {
        | Ok(true) => self.downstream.on_signal(Signal::Next(value)),
        | Ok(false) => {},
        | Err(fault) => {
          self.halted.store(true, Ordering::Release);
          self.downstream.on_signal(Signal::Error(fault));
        },
      },
      | terminal => self.downstream.on_signal(terminal),
    }
  }
}
