use std::{
  sync::mpsc,
  time::{Duration, Instant},
};

use crate::{SchedulerConfig, SchedulerError, SequenceStream, Signal, StreamError, TimerScheduler, UnitStream};

const DELAY: Duration = Duration::from_millis(40);
const WAIT: Duration = Duration::from_secs(5);

fn scheduler() -> TimerScheduler {
  TimerScheduler::new(SchedulerConfig::new().with_thread_name("delay-test")).expect("scheduler")
}

#[test]
fn spaces_values_by_the_delay_and_keeps_order() {
  let scheduler = scheduler();
  let (tx, rx) = mpsc::channel();
  let started = Instant::now();
  let _subscription =
    SequenceStream::of_sequence([1, 2, 3]).delay_elements_on(DELAY, &scheduler).subscribe_signals(move |signal| {
      tx.send((signal, Instant::now())).expect("send");
    });

  for (k, expected) in [1, 2, 3].into_iter().enumerate() {
    let (signal, at) = rx.recv_timeout(WAIT).expect("value");
    assert_eq!(signal, Signal::Next(expected));
    assert!(at.duration_since(started) >= DELAY * (k as u32 + 1));
  }
  let (signal, _) = rx.recv_timeout(WAIT).expect("completion");
  assert_eq!(signal, Signal::Complete);
}

#[test]
fn subscribe_returns_before_the_first_emission() {
  let scheduler = scheduler();
  let (tx, rx) = mpsc::channel();
  let subscription = UnitStream::of("late").delay_elements_on(DELAY, &scheduler).subscribe(move |value| {
    tx.send(value).expect("send");
  });

  assert!(subscription.is_active());
  assert_eq!(rx.try_recv(), Err(mpsc::TryRecvError::Empty));
  assert_eq!(rx.recv_timeout(WAIT), Ok("late"));
}

#[test]
fn empty_upstream_completes_without_waiting() {
  let scheduler = scheduler();
  let started = Instant::now();
  let values = SequenceStream::<u8>::empty().delay_elements_on(Duration::from_secs(30), &scheduler).block_all();
  assert_eq!(values, Ok(Vec::new()));
  assert!(started.elapsed() < Duration::from_secs(30));
}

#[test]
fn upstream_error_is_forwarded() {
  let scheduler = scheduler();
  let outcome = UnitStream::<u8>::failed(StreamError::failed("boom")).delay_elements_on(DELAY, &scheduler).block();
  assert_eq!(outcome, Err(StreamError::failed("boom")));
}

#[test]
fn shutdown_fails_pending_runs() {
  let scheduler = scheduler();
  let stream = SequenceStream::of_sequence([1, 2]).delay_elements_on(Duration::from_secs(30), &scheduler);
  let (tx, rx) = mpsc::channel();
  let _subscription = stream.subscribe_with_error(|_| {}, move |error| tx.send(error).expect("send"));

  scheduler.shutdown();

  assert_eq!(rx.recv_timeout(WAIT), Ok(StreamError::Scheduler(SchedulerError::Closed)));
}

#[test]
fn closed_scheduler_rejects_new_runs() {
  let scheduler = scheduler();
  scheduler.shutdown();
  let outcome = UnitStream::of(1).delay_elements_on(DELAY, &scheduler).block();
  assert_eq!(outcome, Err(StreamError::Scheduler(SchedulerError::Closed)));
}

#[test]
fn unhandled_failure_after_delay_leaves_the_scheduler_running() {
  let scheduler = scheduler();
  let _unobserved = UnitStream::of(1)
    .delay_elements_on(Duration::from_millis(5), &scheduler)
    .map(|_| -> u32 { panic!("late fault") })
    .subscribe(|_| {});

  let outcome = UnitStream::of("still served").delay_elements_on(Duration::from_millis(30), &scheduler).block();
  assert_eq!(outcome, Ok(Some("still served")));
}

#[test]
fn slow_consumer_does_not_stall_other_runs_on_the_same_scheduler() {
  let scheduler = scheduler();
  let _slow = UnitStream::of(1).delay_elements_on(Duration::from_millis(5), &scheduler).subscribe(|_| {
    std::thread::sleep(Duration::from_millis(800));
  });
  std::thread::sleep(Duration::from_millis(50));

  let started = Instant::now();
  let fast = SequenceStream::of_sequence([1]).delay_elements_on(Duration::from_millis(20), &scheduler);
  assert_eq!(fast.block_all(), Ok(vec![1]));
  assert!(started.elapsed() < Duration::from_millis(500));
}
