//! Core engine types and traits

pub mod consumer;
pub mod context;
pub mod engine;
pub mod entry;
pub mod error;
pub mod filter;
pub mod kind;
pub mod metrics;
pub mod queue;
pub mod render;
pub mod timestamp;

pub use consumer::{Consumer, ConsumerRegistry, DispatchSession};
pub use context::Context;
pub use engine::{Engine, EngineBuilder, EngineState, DEFAULT_THREAD_NAME};
pub use entry::Entry;
pub use error::{FlogError, Result};
pub use filter::{FilterAxis, FilterConfig, Rejection, Verdict};
pub use kind::Kind;
pub use metrics::EngineMetrics;
pub use queue::{DoubleBufferedQueue, Drained};
pub use render::TextRenderer;
pub use timestamp::TimestampFormat;
