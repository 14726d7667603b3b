use crate::{StreamError, Subscriber, subscriber::unhandled_error};

type NextCallback<T> = Box<dyn FnMut(T) + Send>;
type ErrorCallback = Box<dyn FnMut(StreamError) + Send>;
type CompleteCallback = Box<dyn FnMut() + Send>;

/// Subscriber assembled from optional callbacks.
pub(crate) struct LambdaSubscriber<T> {
  on_next:     NextCallback<T>,
  on_error:    Option<ErrorCallback>,
  on_complete: Option<CompleteCallback>,
}

impl<T> LambdaSubscriber<T> {
  pub(crate) fn new<N>(on_next: N) -> Self
  where
    N: FnMut(T) + Send + 'static, {
    Self { on_next: Box::new(on_next), on_error: None, on_complete: None }
  }

  #[must_use]
  pub(crate) fn with_error<E>(mut self, on_error: E) -> Self
  where
    E: FnMut(StreamError) + Send + 'static, {
    self.on_error = Some(Box::new(on_error));
    self
  }

  #[must_use]
  pub(crate) fn with_complete<C>(mut self, on_complete: C) -> Self
  where
    C: FnMut() + Send + 'static, {
    self.on_complete = Some(Box::new(on_complete));
    self
  }
}

impl<T> Subscriber<T> for LambdaSubscriber<T>
where
  T: 'static,
{
  fn on_next(&mut self, value: T) {
    (self.on_next)(value);
  }

  fn on_error(&mut self, error: StreamError) {
    match self.on_error.as_mut() {
      | Some(callback) => callback(error),
      | None => unhandled_error(&error),
    }
  }

  fn on_complete(&mut self) {
    if let Some(callback) = self.on_complete.as_mut() {
      callback();
    }
  }
}
