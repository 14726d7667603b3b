use core::fmt;

use portable_atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
  pub(crate) fn next() -> Self {
    Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
  }

  /// Returns the inner identifier.
  #[must_use]
  pub const fn raw(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for SubscriptionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "subscription-{}", self.0)
  }
}
