use super::SchedulerConfig;

#[test]
fn default_config_uses_single_worker() {
  let config = SchedulerConfig::default();
  assert_eq!(config.worker_threads(), 1);
  assert_eq!(config.thread_name(), "fraktor-reactive-timer");
  assert_eq!(config.max_pending_tasks(), 65_536);
}

#[test]
fn zero_limits_are_raised_to_one() {
  let config = SchedulerConfig::new().with_worker_threads(0).with_max_pending_tasks(0);
  assert_eq!(config.worker_threads(), 1);
  assert_eq!(config.max_pending_tasks(), 1);
}

#[test]
fn builder_overrides_are_kept() {
  let config = SchedulerConfig::new().with_worker_threads(2).with_thread_name("timer").with_max_pending_tasks(8);
  assert_eq!(config.worker_threads(), 2);
  assert_eq!(config.thread_name(), "timer");
  assert_eq!(config.max_pending_tasks(), 8);
}
