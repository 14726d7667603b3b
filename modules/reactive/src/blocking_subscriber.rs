use std::sync::Arc;

use crate::{StreamError, Subscriber, blocking_latch::BlockingLatch};

/// Subscriber feeding a [`BlockingLatch`].
pub(crate) struct BlockingSubscriber<T> {
  latch: Arc<BlockingLatch<T>>,
}

impl<T> BlockingSubscriber<T> {
  pub(crate) const fn new(latch: Arc<BlockingLatch<T>>) -> Self {
    Self { latch }
  }
}

impl<T> Subscriber<T> for BlockingSubscriber<T>
where
  T: Send + 'static,
{
  fn on_next(&mut self, value: T) {
    self.latch.push(value);
  }

  fn on_error(&mut self, error: StreamError) {
    self.latch.finish(Err(error));
  }

  fn on_complete(&mut self) {
    self.latch.finish(Ok(()));
  }
}
