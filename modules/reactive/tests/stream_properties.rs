use std::{
  sync::{Arc, Mutex, mpsc},
  thread,
  time::{Duration, Instant},
};

use fraktor_reactive_rs::{
  SchedulerConfig, SchedulerError, SequenceStream, Signal, StreamError, SubscriptionState, TimerScheduler, UnitStream,
};

const WAIT: Duration = Duration::from_secs(5);

fn scheduler() -> TimerScheduler {
  TimerScheduler::new(SchedulerConfig::default()).expect("scheduler")
}

#[test]
fn terminal_signal_is_delivered_exactly_once_and_last() {
  let signals = Arc::new(Mutex::new(Vec::new()));
  let sink = signals.clone();
  SequenceStream::of_sequence([1, 2, 3]).subscribe_signals(move |signal| sink.lock().expect("signals").push(signal));

  let signals = signals.lock().expect("signals");
  assert_eq!(*signals, vec![Signal::Next(1), Signal::Next(2), Signal::Next(3), Signal::Complete]);
  assert_eq!(signals.iter().filter(|signal| signal.is_terminal()).count(), 1);
}

#[test]
fn unit_stream_emits_at_most_one_value() {
  let count = Arc::new(Mutex::new(0));
  let sink = count.clone();
  UnitStream::of(9).map(|v| v + 1).subscribe(move |_| *sink.lock().expect("count") += 1);
  assert_eq!(*count.lock().expect("count"), 1);
}

#[test]
fn delayed_stream_can_be_resubscribed_independently() {
  let scheduler = scheduler();
  let stream = SequenceStream::of_sequence(['x', 'y']).delay_elements_on(Duration::from_millis(15), &scheduler);

  let first = stream.clone();
  let concurrent = thread::spawn(move || first.block_all());
  let second = stream.block_all();

  assert_eq!(second, Ok(vec!['x', 'y']));
  assert_eq!(concurrent.join().expect("join"), Ok(vec!['x', 'y']));
}

#[test]
fn delayed_values_are_delivered_off_the_subscribing_thread() {
  let scheduler = scheduler();
  let caller = thread::current().id();
  let (tx, rx) = mpsc::channel();
  UnitStream::of(()).delay_elements_on(Duration::from_millis(5), &scheduler).subscribe(move |()| {
    tx.send(thread::current().id()).expect("send");
  });
  assert_ne!(rx.recv_timeout(WAIT).expect("value"), caller);
}

#[test]
fn cancel_stops_delivery_mid_stream() {
  let scheduler = scheduler();
  let delay = Duration::from_millis(30);
  let (tx, rx) = mpsc::channel();
  let subscription = SequenceStream::of_sequence(1..=5_u32)
    .delay_elements_on(delay, &scheduler)
    .subscribe(move |value| tx.send(value).expect("send"));

  assert_eq!(rx.recv_timeout(WAIT), Ok(1));
  assert!(subscription.cancel());
  assert_eq!(subscription.state(), SubscriptionState::Cancelled);

  thread::sleep(delay * 4);
  assert!(rx.try_iter().next().is_none());
}

#[test]
fn block_waits_for_the_delay() {
  let scheduler = scheduler();
  let delay = Duration::from_millis(50);
  let started = Instant::now();
  assert_eq!(UnitStream::of("slow").delay_elements_on(delay, &scheduler).block(), Ok(Some("slow")));
  assert!(started.elapsed() >= delay);
}

#[test]
fn stage_fault_after_delay_reaches_the_blocking_caller() {
  let scheduler = scheduler();
  let outcome = SequenceStream::of_sequence([1, 0, 2])
    .delay_elements_on(Duration::from_millis(5), &scheduler)
    .map(|v| 10 / v)
    .block_all();

  match outcome {
    | Err(StreamError::StageFault { stage, .. }) => assert_eq!(stage, "map"),
    | other => panic!("unexpected outcome {other:?}"),
  }
}

#[test]
fn shutdown_unblocks_waiting_caller() {
  let scheduler = scheduler();
  let stream = UnitStream::of(1).delay_elements_on(Duration::from_secs(60), &scheduler);
  let waiter = thread::spawn(move || stream.block());

  thread::sleep(Duration::from_millis(50));
  scheduler.shutdown();

  assert_eq!(waiter.join().expect("join"), Err(StreamError::Scheduler(SchedulerError::Closed)));
}

#[test]
fn completion_hook_is_skipped_when_cancelled() {
  let scheduler = scheduler();
  let hook_calls = Arc::new(Mutex::new(0));
  let counter = hook_calls.clone();
  let subscription = SequenceStream::of_sequence([1, 2])
    .delay_elements_on(Duration::from_millis(30), &scheduler)
    .on_complete(move || *counter.lock().expect("hook") += 1)
    .subscribe(|_| {});

  assert!(subscription.cancel());
  thread::sleep(Duration::from_millis(150));
  assert_eq!(*hook_calls.lock().expect("hook"), 0);
}

#[test]
fn panicking_hook_fails_the_blocking_caller() {
  let outcome = SequenceStream::of_sequence([1, 2]).on_complete(|| panic!("hook")).block_all();
  match outcome {
    | Err(StreamError::StageFault { stage, message }) => {
      assert_eq!(stage, "on_complete");
      assert_eq!(message, "hook");
    },
    | other => panic!("unexpected outcome {other:?}"),
  }
}
