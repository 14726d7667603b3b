#![deny(missing_docs)]
#![deny(unsafe_code)]

//! Minimal reactive stream engine for the fraktor runtime.
//!
//! A pipeline starts from a [`UnitStream`] (zero or one value) or a [`SequenceStream`] (zero or
//! many values), composes operators such as `map`, `filter`, `delay_elements` and `on_complete`,
//! and is driven either by subscribing callbacks or by blocking the calling thread until the
//! pipeline terminates. Delayed emission runs on a [`TimerScheduler`].

/// Latch used by the blocking terminal actions.
mod blocking_latch;
/// Subscriber that feeds the blocking latch.
mod blocking_subscriber;
/// Delay operator stage.
mod delay_publisher;
/// Publisher that fails immediately.
mod failed_publisher;
/// Filter operator stage.
mod filter_publisher;
/// Closure-backed timer task.
mod fn_task;
/// Callback-based subscriber.
mod lambda_subscriber;
/// Map operator stage.
mod map_publisher;
/// Downstream signal receiver used between stages.
mod observer;
/// Completion hook operator stage.
mod on_complete_publisher;
/// Stage composition helpers shared by both stream kinds.
mod operator;
/// Upstream signal producer used between stages.
mod publisher;
/// Scheduler configuration.
mod scheduler_config;
/// Scheduler error definitions.
mod scheduler_error;
/// Cancellable handle of a scheduled task.
mod scheduled_task;
/// Sequence stream definition.
mod sequence_stream;
/// Signal vocabulary.
mod signal;
/// Subscriber forwarding raw signals.
mod signal_subscriber;
/// Panic capture for stage functions.
mod stage_guard;
/// Stream error definitions.
mod stream_error;
/// Subscriber trait.
mod subscriber;
/// Public subscription handle.
mod subscription;
/// Shared per-run subscription state (internal).
mod subscription_context;
/// Terminal stage driving a subscriber (internal).
mod subscription_driver;
/// Subscription identifier.
mod subscription_id;
/// Subscription lifecycle states.
mod subscription_state;
/// Scheduled task identifier.
mod task_id;
/// Deadline-ordered task queue (internal).
mod timer_queue;
/// Tokio-backed timer scheduler.
mod timer_scheduler;
/// Timer task trait.
mod timer_task;
/// Unit stream definition.
mod unit_stream;
/// Source stage replaying buffered values.
mod values_publisher;

pub use scheduled_task::ScheduledTask;
pub use scheduler_config::SchedulerConfig;
pub use scheduler_error::SchedulerError;
pub use sequence_stream::SequenceStream;
pub use signal::Signal;
pub use stream_error::StreamError;
pub use subscriber::Subscriber;
pub use subscription::Subscription;
pub use subscription_id::SubscriptionId;
pub use subscription_state::SubscriptionState;
pub use task_id::TaskId;
pub use timer_scheduler::TimerScheduler;
pub use timer_task::TimerTask;
pub use unit_stream::UnitStream;
