//! Public handle of a running subscription.

use core::fmt;

use tracing::debug;

use crate::{SubscriptionId, SubscriptionState, subscription_context::SubscriptionContext};


/// Handle returned by the `subscribe*` family.
///
/// Dropping the handle does not cancel the run.
pub struct Subscription {
  context: SubscriptionContext,
}

impl Subscription {
  pub(crate) const fn new(context: SubscriptionContext) -> Self {
    Self { context }
  }

  /// Returns the identifier of this run.
  #[must_use]
  pub const fn id(&self) -> SubscriptionId {
    self.context.id()
  }

  /// Returns the current lifecycle state.
  #[must_use]
  pub fn state(&self) -> SubscriptionState {
    self.context.state()
  }

  /// Returns `true` while signals may still be delivered.
  #[must_use]
  pub fn is_active(&self) -> bool {
    self.context.is_active()
  }

  /// Returns the number of scheduled emissions still pending for this run.
  #[must_use]
  pub fn pending_tasks(&self) -> usize {
    self.context.pending_tasks()
  }

  /// Cancels the run.
  ///
  /// Pending scheduled emissions are cancelled and no further subscriber callback is invoked.
  /// Returns `false` when the run had already terminated.
  pub fn cancel(&self) -> bool {
    let cancelled = self.context.terminate(SubscriptionState::Cancelled);
    if cancelled {
      debug!(subscription = self.id().raw(), "subscription cancelled");
    }
    cancelled
  }
}

impl fmt::Debug for Subscription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscription").field("id", &self.id()).field("state", &self.state()).finish()
  }
}
