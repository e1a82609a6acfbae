//! # flog
//!
//! An in-process asynchronous logging engine.
//!
//! ## Features
//!
//! - **Cheap call sites**: producers append to a double-buffered queue and
//!   return; filtering and output happen on a single drain thread
//! - **Dynamic filtering**: verbosity, category, filename and message regex
//!   filters, changeable at runtime
//! - **Pluggable consumers**: stdout, file, JSON lines, channel, or your own
//! - **Restartable**: flush, stop and restart the drain thread at any time
//!
//! ```
//! use flog::prelude::*;
//! use flog::log_error;
//!
//! let (consumer, received) = ChannelConsumer::unbounded();
//! let engine = Engine::builder()
//!     .without_default_consumer()
//!     .consumer(consumer)
//!     .build()?;
//!
//! log_error!(engine, "io", "disk {} full", "/dev/sda1");
//! engine.flush();
//!
//! let entry = received.try_recv().unwrap();
//! assert_eq!(entry.kind, Kind::Error);
//! assert_eq!(entry.message, "disk /dev/sda1 full");
//! # Ok::<(), FlogError>(())
//! ```

pub mod consumers;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::consumers::{ChannelConsumer, JsonConsumer, StdoutConsumer};
    #[cfg(feature = "file")]
    pub use crate::consumers::FileConsumer;
    pub use crate::core::{
        Consumer, Context, Engine, EngineBuilder, EngineMetrics, EngineState, Entry, FilterAxis,
        FilterConfig, FlogError, Kind, Result, TextRenderer, TimestampFormat,
    };
}

pub use crate::consumers::{ChannelConsumer, JsonConsumer, StdoutConsumer};
#[cfg(feature = "file")]
pub use crate::consumers::FileConsumer;
pub use crate::core::{
    Consumer, Context, DoubleBufferedQueue, Engine, EngineBuilder, EngineMetrics, EngineState,
    Entry, FilterAxis, FilterConfig, FlogError, Kind, Result, TextRenderer, TimestampFormat,
};
