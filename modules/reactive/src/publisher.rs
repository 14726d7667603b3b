use std::sync::Arc;

use crate::{observer::ObserverRef, subscription_context::SubscriptionContext};

/// Producer side of a stage link.
///
/// Publishers are immutable once composed; every call to [`Publisher::subscribe`] starts an
/// independent run whose state lives in the observers it creates.
pub(crate) trait Publisher<T>: Send + Sync {
  /// Starts emitting signals for `context` into `downstream`.
  fn subscribe(&self, context: &SubscriptionContext, downstream: ObserverRef<T>);
}

/// Shared reference to an upstream publisher.
pub(crate) type PublisherRef<T> = Arc<dyn Publisher<T>>;
