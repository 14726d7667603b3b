//! Conversion of panics raised by user-supplied stage code into stream errors.

use core::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::StreamError;


/// Runs `body`, turning a panic into [`StreamError::StageFault`] attributed to `stage`.
pub(crate) fn guard_stage<R, F>(stage: &'static str, body: F) -> Result<R, StreamError>
where
  F: FnOnce() -> R, {
  panic::catch_unwind(AssertUnwindSafe(body))
    .map_err(|payload| StreamError::stage_fault(stage, panic_message(payload.as_ref())))
}

/// Extracts the message of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    return (*message).to_string();
  }
  if let Some(message) = payload.downcast_ref::<String>() {
    return message.clone();
  }
  String::from("opaque panic payload")
}
