//! Stream of at most one value.

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


/// Stream emitting at most one value, then completing.
///
/// Composing an operator returns a new stream and leaves `self` untouched, so a stream can be
/// subscribed any number of times; every terminal action starts an independent run.
pub struct UnitStream<T> {
  publisher: PublisherRef<T>,
}

impl<T> Clone for UnitStream<T> {
  fn clone(&self) -> Self {
    Self { publisher: self.publisher.clone() }
  }
}

impl<T> UnitStream<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Creates a stream emitting `value`.
  #[must_use]
  pub fn of(value: T) -> Self {
    Self::from_publisher(Arc::new(ValuesPublisher::new(vec![value])))
  }

  /// Creates a stream emitting `value` when it is [`Some`], otherwise completing empty.
  #[must_use]
  pub fn of_optional(value: Option<T>) -> Self {
    Self::from_publisher(Arc::new(ValuesPublisher::new(value.into_iter().collect())))
  }

  /// Creates a stream that completes without a value.
  #[must_use]
  pub fn empty() -> Self {
    Self::of_optional(None)
  }
}

impl<T> UnitStream<T>
where
  T: Send + 'static,
{
  /// Creates a stream that fails every run with `error`.
  #[must_use]
  pub fn failed(error: StreamError) -> Self {
    Self::from_publisher(Arc::new(FailedPublisher::new(error)))
  }

  pub(crate) const fn from_publisher(publisher: PublisherRef<T>) -> Self {
    Self { publisher }
  }

  /// Transforms the value. A panic in `func` fails the stream with a `map` stage fault.
  #[must_use]
  pub fn map<U, F>(&self, func: F) -> UnitStream<U>
  where
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static, {
    UnitStream::from_publisher(operator::map(&self.publisher, func))
  }

  /// Transforms the value with a fallible function. An `Err` fails the stream with a `try_map`
  /// stage fault carrying the error's message.
  #[must_use]
  pub fn try_map<U, E, F>(&self, func: F) -> UnitStream<U>
  where
    U: Send + 'static,
    E: Display,
    F: Fn(T) -> Result<U, E> + Send + Sync + 'static, {
    UnitStream::from_publisher(operator::try_map(&self.publisher, func))
  }

  /// Keeps the value only when `predicate` accepts it; otherwise the stream completes empty.
  #[must_use]
  pub fn filter<P>(&self, predicate: P) -> Self
  where
    P: Fn(&T) -> bool + Send + Sync + 'static, {
    Self::from_publisher(operator::filter(&self.publisher, predicate))
  }

  /// Delays the value by `delay` using the shared [`TimerScheduler`].
  #[must_use]
  pub fn delay_elements(&self, delay: Duration) -> Self {
    Self::from_publisher(operator::delay_elements(&self.publisher, delay, None))
  }

  /// Delays the value by `delay` using `scheduler`.
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

  /// Starts a run delivering the value to `on_next`.
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

  /// Runs the stream and parks the calling thread until it terminates.
  ///
  /// Returns `Ok(None)` when the stream completed without a value.
  ///
  /// # Errors
  ///
  /// Returns the error that failed the stream.
  pub fn block(&self) -> Result<Option<T>, StreamError> {
    operator::block_on(&self.publisher).map(|values| values.into_iter().next())
  }
}
