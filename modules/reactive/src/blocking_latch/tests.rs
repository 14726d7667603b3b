use std::{sync::Arc, thread, time::Duration};

use super::BlockingLatch;
use crate::StreamError;

#[test]
fn wait_returns_values_after_success() {
  let latch = BlockingLatch::new();
  latch.push(1_u32);
  latch.push(2);
  latch.finish(Ok(()));
  assert_eq!(latch.wait(), Ok(vec![1, 2]));
}

#[test]
fn wait_returns_error_after_failure() {
  let latch = BlockingLatch::<u32>::new();
  latch.push(1);
  latch.finish(Err(StreamError::failed("boom")));
  assert_eq!(latch.wait(), Err(StreamError::failed("boom")));
}

#[test]
fn only_the_first_outcome_is_kept() {
  let latch = BlockingLatch::<u32>::new();
  latch.finish(Ok(()));
  latch.finish(Err(StreamError::failed("late")));
  latch.push(9);
  assert_eq!(latch.wait(), Ok(Vec::new()));
}

#[test]
fn waiter_wakes_when_another_thread_finishes() {
  let latch = Arc::new(BlockingLatch::new());
  let producer = {
    let latch = latch.clone();
    thread::spawn(move || {
      thread::sleep(Duration::from_millis(20));
      latch.push("fiona");
      latch.finish(Ok(()));
    })
  };

  assert_eq!(latch.wait(), Ok(vec!["fiona"]));
  producer.join().expect("producer");
}
