use crate::{Signal, StreamError, Subscriber};

/// Subscriber handing every signal, terminal ones included, to a single callback.
pub(crate) struct SignalSubscriber<F> {
  on_signal: F,
}

impl<F> SignalSubscriber<F> {
  pub(crate) const fn new(on_signal: F) -> Self {
    Self { on_signal }
  }
}

impl<T, F> Subscriber<T> for SignalSubscriber<F>
where
  F: FnMut(Signal<T>) + Send + 'static,
{
  fn on_next(&mut self, value: T) {
    (self.on_signal)(Signal::Next(value));
  }

  fn on_error(&mut self, error: StreamError) {
    (self.on_signal)(Signal::Error(error));
  }

  fn on_complete(&mut self) {
    (self.on_signal)(Signal::Complete);
  }
}
