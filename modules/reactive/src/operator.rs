//! Composition of operator stages on top of an upstream publisher.
//!
//! [`UnitStream`](crate::UnitStream) and [`SequenceStream`](crate::SequenceStream) share these
//! helpers; only the cardinality guarantees differ between the two.

use core::{fmt::Display, time::Duration};
use std::sync::Arc;

use crate::{
  StreamError, Subscriber, Subscription, TimerScheduler,
  blocking_latch::BlockingLatch,
  blocking_subscriber::BlockingSubscriber,
  delay_publisher::DelayPublisher,
  filter_publisher::FilterPublisher,
  map_publisher::MapPublisher,
  on_complete_publisher::OnCompletePublisher,
  publisher::PublisherRef,
  subscription_driver::SubscriptionDriver,
};

pub(crate) fn map<In, Out, F>(upstream: &PublisherRef<In>, func: F) -> PublisherRef<Out>
where
  In: Send + 'static,
  Out: Send + 'static,
  F: Fn(In) -> Out + Send + Sync + 'static, {
  Arc::new(MapPublisher::new("map", upstream.clone(), move |value| Ok(func(value))))
}

pub(crate) fn try_map<In, Out, E, F>(upstream: &PublisherRef<In>, func: F) -> PublisherRef<Out>
where
  In: Send + 'static,
  Out: Send + 'static,
  E: Display,
  F: Fn(In) -> Result<Out, E> + Send + Sync + 'static, {
  Arc::new(MapPublisher::new("try_map", upstream.clone(), move |value| func(value).map_err(|error| error.to_string())))
}

pub(crate) fn filter<T, P>(upstream: &PublisherRef<T>, predicate: P) -> PublisherRef<T>
where
  T: Send + 'static,
  P: Fn(&T) -> bool + Send + Sync + 'static, {
  Arc::new(FilterPublisher::new(upstream.clone(), predicate))
}

pub(crate) fn delay_elements<T>(
  upstream: &PublisherRef<T>,
  delay: Duration,
  scheduler: Option<TimerScheduler>,
) -> PublisherRef<T>
where
  T: Send + 'static, {
  Arc::new(DelayPublisher::new(upstream.clone(), delay, scheduler))
}

pub(crate) fn on_complete<T, H>(upstream: &PublisherRef<T>, hook: H) -> PublisherRef<T>
where
  T: Send + 'static,
  H: Fn() + Send + Sync + 'static, {
  Arc::new(OnCompletePublisher::new(upstream.clone(), hook))
}

pub(crate) fn subscribe<T, S>(publisher: &PublisherRef<T>, subscriber: S) -> Subscription
where
  T: Send + 'static,
  S: Subscriber<T>, {
  SubscriptionDriver::start(publisher, subscriber)
}

/// Runs `publisher` and parks the calling thread until it terminates.
pub(crate) fn block_on<T>(publisher: &PublisherRef<T>) -> Result<Vec<T>, StreamError>
where
  T: Send + 'static, {
  let latch = Arc::new(BlockingLatch::new());
  let _subscription = subscribe(publisher, BlockingSubscriber::new(latch.clone()));
  latch.wait()
}
