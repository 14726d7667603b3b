//! Subscription state definitions.

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
  /// Signals are still being delivered.
  Active,
  /// The stream completed successfully.
  Completed,
  /// The stream failed.
  Errored,
  /// The subscription was cancelled.
  Cancelled,
}

impl SubscriptionState {
  /// Returns `true` for every state except [`SubscriptionState::Active`].
  #[must_use]
  pub const fn is_terminal(self) -> bool {
    !matches!(self, Self::Active)
  }
}
