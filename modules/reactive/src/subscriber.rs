//! Consumer of a stream run.

use tracing::error;

use crate::StreamError;

/// Terminal consumer of a subscription.
///
/// Callbacks of one subscription never run concurrently. After [`Subscriber::on_complete`] or
/// [`Subscriber::on_error`] no further callback is invoked.
pub trait Subscriber<T>: Send + 'static {
  /// Receives one value.
  fn on_next(&mut self, value: T);

  /// Receives the failure that ended the stream.
  ///
  /// The default implementation logs the error and panics on the delivering thread so that an
  /// unhandled failure is never lost.
  fn on_error(&mut self, error: StreamError) {
    unhandled_error(&error);
  }

  /// Called once after the last value of a successful stream.
  fn on_complete(&mut self) {}
}

pub(crate) fn unhandled_error(error: &StreamError) -> ! {
  error!(%error, "stream failed without an error callback");
  panic!("unhandled stream error: {error}");
}
