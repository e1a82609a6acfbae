//! Consumer implementations

pub mod channel;
#[cfg(feature = "file")]
pub mod file;
pub mod json;
pub mod stdout;

pub use channel::ChannelConsumer;
#[cfg(feature = "file")]
pub use file::FileConsumer;
pub use json::JsonConsumer;
pub use stdout::StdoutConsumer;

pub use crate::core::Consumer;
