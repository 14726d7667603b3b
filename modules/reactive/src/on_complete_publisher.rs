use std::sync::Arc;

use crate::{
  Signal,
  observer::{Observer, ObserverRef},
  publisher::{Publisher, PublisherRef},
  stage_guard::guard_stage,
  subscription_context::SubscriptionContext,
};

const STAGE: &str = "on_complete";

type Hook = Arc<dyn Fn() + Send + Sync>;

/// Stage running a hook right before forwarding completion.
pub(crate) struct OnCompletePublisher<T> {
  upstream: PublisherRef<T>,
  hook:     Hook,
}

struct OnCompleteObserver<T> {
  context:    SubscriptionContext,
  hook:       Hook,
  downstream: ObserverRef<T>,
}

impl<T> OnCompletePublisher<T>
where
  T: Send + 'static,
{
  pub(crate) fn new<H>(upstream: PublisherRef<T>, hook: H) -> Self
  where
    H: Fn() + Send + Sync + 'static, {
    Self { upstream, hook: Arc::new(hook) }
  }
}

impl<T> Publisher<T> for OnCompletePublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, context: &SubscriptionContext, downstream: ObserverRef<T>) {
    let observer = OnCompleteObserver { context: context.clone(), hook: self.hook.clone(), downstream };
    self.upstream.subscribe(context, Arc::new(observer));
  }
}

impl<T> Observer<T> for OnCompleteObserver<T>
where
  T: Send + 'static,
{
  fn on_signal(&self, signal: Signal<T>) {
    match signal {
      | Signal::Complete => {
        // キャンセル済みの場合はフックを呼ばない
        if !self.context.is_active() {
          return;
        }
        match guard_stage(STAGE, || (self.hook)()) {
          | Ok(()) => self.downstream.on_signal(Signal::Complete),
          | Err(fault) => self.downstream.on_signal(Signal::Error(fault)),
        }
      },
      | other => self.downstream.on_signal(other),
    }
  }
}
