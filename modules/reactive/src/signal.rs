//! Signal vocabulary flowing through every stage.

use crate::StreamError;


/// Event emitted by a stream stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<T> {
  /// A value.
  Next(T),
  /// The stream finished successfully.
  Complete,
  /// The stream failed.
  Error(StreamError),
}

impl<T> Signal<T> {
  /// Returns `true` for [`Signal::Complete`] and [`Signal::Error`].
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Complete | Self::Error(_))
  }

  /// Transforms the carried value, leaving terminal signals untouched.
  #[must_use]
  pub fn map<U, F>(self, func: F) -> Signal<U>
  where
    F: FnOnce(T) -> U, {
    match self {
      | Self::Next(value) => Signal::Next(func(value)),
      | Self::Complete => Signal::Complete,
      | Self::Error(error) => Signal::Error(error),
    }
  }
}
