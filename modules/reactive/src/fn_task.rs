use crate::TimerTask;

/// [`TimerTask`] adapter for plain closures.
pub(crate) struct FnTask<F> {
  func: F,
}

impl<F> FnTask<F>
where
  F: FnOnce() + Send + 'static,
{
  pub(crate) const fn new(func: F) -> Self {
    Self { func }
  }
}

impl<F> TimerTask for FnTask<F>
where
  F: FnOnce() + Send + 'static,
{
  fn run(self: Box<Self>) {
    let Self { func } = *self;
    func();
  }
}
