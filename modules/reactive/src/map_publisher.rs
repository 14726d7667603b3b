use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

use crate::{
  Signal, StreamError,
  observer::{Observer, ObserverRef},
  publisher::{Publisher, PublisherRef},
  stage_guard::guard_stage,
  subscription_context::SubscriptionContext,
};

/// Stage applying a fallible transformation to every value.
///
/// Both `map` and `try_map` compile down to this stage; `map` wraps its function in `Ok`.
pub(crate) struct MapPublisher<In, Out> {
  stage:    &'static str,
  upstream: PublisherRef<In>,
  func:     MapFn<In, Out>,
}

type MapFn<In, Out> = Arc<dyn Fn(In) -> Result<Out, String> + Send + Sync>;

struct MapObserver<In, Out> {
  stage:      &'static str,
  func:       MapFn<In, Out>,
  downstream: ObserverRef<Out>,
  halted:     AtomicBool,
}

impl<In, Out> MapPublisher<In, Out>
where
  In: Send + 'static,
  Out: Send + 'static,
{
  pub(crate) fn new<F>(stage: &'static str, upstream: PublisherRef<In>, func: F) -> Self
  where
    F: Fn(In) -> Result<Out, String> + Send + Sync + 'static, {
    Self { stage, upstream, func: Arc::new(func) }
  }
}

impl<In, Out> Publisher<Out> for MapPublisher<In, Out>
where
  In: Send + 'static,
  Out: Send + 'static,
{
  fn subscribe(&self, context: &SubscriptionContext, downstream: ObserverRef<Out>) {
    let observer =
      MapObserver { stage: self.stage, func: self.func.clone(), downstream, halted: AtomicBool::new(false) };
    self.upstream.subscribe(context, Arc::new(observer));
  }
}

impl<In, Out> Observer<In> for MapObserver<In, Out>
where
  In: Send + 'static,
  Out: Send + 'static,
{
  fn on_signal(&self, signal: Signal<In>) {
    if self.halted.load(Ordering::Acquire) {
      return;
    }
    match signal {
      | Signal::Next(value) => {
        let outcome = match guard_stage(self.stage, || (self.func)(value)) {
          | Ok(Ok(output)) => Ok(output),
          | Ok(Err(message)) => Err(StreamError::stage_fault(self.stage, message)),
          | Err(fault) => Err(fault),
        };
        match outcome {
          | Ok(output) => self.downstream.on_signal(Signal::Next(output)),
          | Err(fault) => {
            self.halted.store(true, Ordering::Release);
            self.downstream.on_signal(Signal::Error(fault));
          },
        }
      },
      | Signal::Complete => self.downstream.on_signal(Signal::Complete),
      | Signal::Error(error) => self.downstream.on_signal(Signal::Error(error)),
    }
  }
}
