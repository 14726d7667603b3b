use tracing::trace;

use crate::{
  Signal,
  observer::ObserverRef,
  publisher::Publisher,
  subscription_context::SubscriptionContext,
};

/// Source stage replaying its buffered values in order, then completing.
///
/// Values are cloned per run so the source can be subscribed any number of times.
pub(crate) struct ValuesPublisher<T> {
  values: Vec<T>,
}

impl<T> ValuesPublisher<T> {
  pub(crate) const fn new(values: Vec<T>) -> Self {
    Self { values }
  }
}

impl<T> Publisher<T> for ValuesPublisher<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn subscribe(&self, context: &SubscriptionContext, downstream: ObserverRef<T>) {
    for (index, value) in self.values.iter().enumerate() {
      if !context.is_active() {
        trace!(subscription = context.id().raw(), emitted = index, "source stopped before exhausting its values");
        return;
      }
      downstream.on_signal(Signal::Next(value.clone()));
    }
    if context.is_active() {
      downstream.on_signal(Signal::Complete);
    }
  }
}
