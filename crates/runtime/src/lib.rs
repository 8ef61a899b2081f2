//! Runtime orchestration for Chegg matches.
//!
//! This crate wraps the synchronous `chegg-core` engine with the pieces a
//! host application needs around a match:
//! - [`session`] owns the engine inputs and drives commands
//! - [`queue`] serializes commands from several callers
//! - [`events`] fans match events out to observers by topic
//! - [`log`] persists accepted commands as JSON lines and replays them
//! - [`config`] reads session settings from the environment
pub mod config;
pub mod error;
pub mod events;
pub mod log;
pub mod queue;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, EventObserver, EventRecorder, ObserverId, Topic, TracingObserver};
pub use log::{CommandLog, LogRecord, MatchLog};
pub use queue::CommandQueue;
pub use session::{Outcome, Session};
