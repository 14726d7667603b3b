use core::marker::PhantomData;

use crate::{
  Signal, StreamError,
  observer::ObserverRef,
  publisher::Publisher,
  subscription_context::SubscriptionContext,
};

/// Source stage that fails every run with the same error.
pub(crate) struct FailedPublisher<T> {
  error: StreamError,
  _pd:   PhantomData<fn() -> T>,
}

impl<T> FailedPublisher<T> {
  pub(crate) const fn new(error: StreamError) -> Self {
    Self { error, _pd: PhantomData }
  }
}

impl<T> Publisher<T> for FailedPublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, _context: &SubscriptionContext, downstream: ObserverRef<T>) {
    downstream.on_signal(Signal::Error(self.error.clone()));
  }
}
