//! Stream of zero or more values.

use core::{fmt::Display, time::Duration};
use std::sync::Arc;

use crate::{
  Signal, StreamError, Subscriber, Subscription, TimerScheduler,
  failed_publisher::FailedPublisher,
  lambda_subscriber::LambdaSubscriber,
  operator,
  publisher::PublisherRef,
  signal_subscriber::SignalSubscriber,
  values_publisher::ValuesPublisher,
};


/// Stream emitting a finite, ordered sequence of values, then completing.
///
/// Like [`UnitStream`](crate::UnitStream), composition never mutates `self` and every terminal
/// action starts an independent run.
pub struct SequenceStream<T> {
  publisher: PublisherRef<T>,
}

impl<T> Clone for SequenceStream<T> {
  fn clone(&self) -> Self {
    Self { publisher: self.publisher.clone() }
  }
}

impl<T> SequenceStream<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Creates a stream emitting `values` in iteration order.
  #[must_use]
  pub fn of_sequence<I>(values: I) -> Self
  where
    I: IntoIterator<Item = T>, {
    Self::from_publisher(Arc::new(ValuesPublisher::new(values.into_iter().collect())))
  }

  /// Creates a stream that completes without values.
  #[must_use]
  pub fn empty() -> Self {
    Self::of_sequence(Vec::new())
  }
}

impl<T> FromIterator<T> for SequenceStream<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self::of_sequence(iter)
  }
}

impl<T> SequenceStream<T>
where
  T: Send + 'static,
{
  /// Creates a stream that fails every run with `error`.
  #[must_use]
  pub fn failed(error: StreamError) -> Self {
    Self::from_publisher(Arc::new(FailedPublisher::new(error)))
  }

  const fn from_publisher(publisher: PublisherRef<T>) -> Self {
    Self { publisher }
  }

  /// Transforms every value. A panic in `func` fails the stream with a `map` stage fault and
  /// stops further values.
  #[must_use]
  pub fn map<U, F>(&self, func: F) -> SequenceStream<U>
  where
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static, {
    SequenceStream::from_publisher(operator::map(&self.publisher, func))
  }

  /// Transforms every value with a fallible function. The first `Err` fails the stream with a
  /// `try_map` stage fault.
  #[must_use]
  pub fn try_map<U, E, F>(&self, func: F) -> SequenceStream<U>
  where
    U: Send + 'static,
    E: Display,
    F: Fn(T) -> Result<U, E> + Send + Sync + 'static, {
    SequenceStream::from_publisher(operator::try_map(&self.publisher, func))
  }

  /// Keeps only the values accepted by `predicate`.
  #[must_use]
  pub fn filter<P>(&self, predicate: P) -> Self
  where
    P: Fn(&T) -> bool + Send + Sync + 'static, {
    Self::from_publisher(operator::filter(&self.publisher, predicate))
  }

  /// Emits every value `delay` after the previous one, using the shared [`TimerScheduler`].
  ///
  /// The k-th value is delivered no earlier than k × `delay` after the run started; completion
  /// follows the last delayed value.
  #[must_use]
  pub fn delay_elements(&self, delay: Duration) -> Self {
    Self::from_publisher(operator::delay_elements(&self.publisher, delay, None))
  }

  /// Same as [`SequenceStream::delay_elements`] on an explicit `scheduler`.
  #[must_use]
  pub fn delay_elements_on(&self, delay: Duration, scheduler: &TimerScheduler) -> Self {
    Self::from_publisher(operator::delay_elements(&self.publisher, delay, Some(scheduler.clone())))
  }

  /// Runs `hook` right before completion is forwarded. Not run on failure or cancellation.
  #[must_use]
  pub fn on_complete<H>(&self, hook: H) -> Self
  where
    H: Fn() + Send + Sync + 'static, {
    Self::from_publisher(operator::on_complete(&self.publisher, hook))
  }

  /// Starts a run delivering every value to `on_next`.
  ///
  /// A failure without an error callback is logged and raised as a panic on the delivering thread.
  pub fn subscribe<N>(&self, on_next: N) -> Subscription
  where
    N: FnMut(T) + Send + 'static, {
    self.subscribe_subscriber(LambdaSubscriber::new(on_next))
  }

  /// Starts a run with value and error callbacks.
  pub fn subscribe_with_error<N, E>(&self, on_next: N, on_error: E) -> Subscription
  where
    N: FnMut(T) + Send + 'static,
    E: FnMut(StreamError) + Send + 'static, {
    self.subscribe_subscriber(LambdaSubscriber::new(on_next).with_error(on_error))
  }

  /// Starts a run with value, error and completion callbacks.
  pub fn subscribe_with<N, E, C>(&self, on_next: N, on_error: E, on_complete: C) -> Subscription
  where
    N: FnMut(T) + Send + 'static,
    E: FnMut(StreamError) + Send + 'static,
    C: FnMut() + Send + 'static, {
    self.subscribe_subscriber(LambdaSubscriber::new(on_next).with_error(on_error).with_complete(on_complete))
  }

  /// Starts a run handing every [`Signal`] to `on_signal`.
  pub fn subscribe_signals<F>(&self, on_signal: F) -> Subscription
  where
    F: FnMut(Signal<T>) + Send + 'static, {
    self.subscribe_subscriber(SignalSubscriber::new(on_signal))
  }

  /// Starts a run delivering into a custom [`Subscriber`].
  pub fn subscribe_subscriber<S>(&self, subscriber: S) -> Subscription
  where
    S: Subscriber<T>, {
    operator::subscribe(&self.publisher, subscriber)
  }

  /// Runs the stream and parks the calling thread until it terminates, returning every value.
  ///
  /// # Errors
  ///
  /// Returns the error that failed the stream. Values received before the failure are discarded.
  pub fn block_all(&self) -> Result<Vec<T>, StreamError> {
    operator::block_on(&self.publisher)
  }
}
