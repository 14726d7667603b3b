use std::sync::Arc;

use crate::Signal;

/// Receiver side of a stage link. Each stage pushes its signals into the next one.
pub(crate) trait Observer<T>: Send + Sync {
  /// Handles one signal coming from upstream.
  fn on_signal(&self, signal: Signal<T>);
}

/// Shared reference to a downstream observer.
pub(crate) type ObserverRef<T> = Arc<dyn Observer<T>>;
