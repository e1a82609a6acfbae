//! Consumer capability and the ordered registry the drain thread fans out to

use super::{entry::Entry, error::Result, metrics::EngineMetrics};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// An output sink for accepted log entries.
///
/// Consumers are only ever called from the engine's drain thread, so they do
/// not need internal synchronization. They may block on I/O.
pub trait Consumer: Send {
    fn consume(&mut self, entry: &Entry) -> Result<()>;

    /// Called once at the end of every drain cycle.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Ordered set of owned consumers; registration order is invocation order.
#[derive(Default)]
pub struct ConsumerRegistry {
    consumers: Mutex<Vec<Box<dyn Consumer>>>,
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl ConsumerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, consumer: Box<dyn Consumer>) {
        self.consumers.lock().push(consumer);
    }

    /// Remove and release every consumer.
    pub fn clear(&self) {
        let released = std::mem::take(&mut *self.consumers.lock());
        // Drop outside the lock; file consumers flush on drop.
        drop(released);
    }

    /// Swap the whole list, returning the previous consumers.
    pub fn replace(&self, consumers: Vec<Box<dyn Consumer>>) -> Vec<Box<dyn Consumer>> {
        std::mem::replace(&mut *self.consumers.lock(), consumers)
    }

    pub fn len(&self) -> usize {
        self.consumers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.lock().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.consumers
            .lock()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Lock the registry for one drain cycle.
    ///
    /// Registration and clearing wait until the cycle's batch is dispatched.
    pub fn session<'a>(&'a self, metrics: &'a EngineMetrics) -> DispatchSession<'a> {
        DispatchSession {
            consumers: self.consumers.lock(),
            metrics,
        }
    }
}

/// Exclusive access to the consumer list for the duration of a drain cycle
pub struct DispatchSession<'a> {
    consumers: parking_lot::MutexGuard<'a, Vec<Box<dyn Consumer>>>,
    metrics: &'a EngineMetrics,
}

impl DispatchSession<'_> {
    /// Hand one entry to every consumer in order.
    ///
    /// A consumer that errors or panics is reported and skipped; the rest
    /// still receive the entry. Returns the number of failed consumers.
    pub fn dispatch(&mut self, entry: &Entry) -> usize {
        let mut failures = 0;

        for consumer in self.consumers.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| consumer.consume(entry)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[FLOG ERROR] Consumer '{}' failed: {}", consumer.name(), e);
                    failures += 1;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[FLOG CRITICAL] Consumer '{}' panicked: {}. \
                         Other consumers continue to function.",
                        consumer.name(),
                        panic_message(panic_info.as_ref())
                    );
                    failures += 1;
                }
            }
        }

        for _ in 0..failures {
            self.metrics.record_consumer_failure();
        }
        failures
    }

    /// Flush every consumer with the same isolation as [`dispatch`](Self::dispatch).
    pub fn flush(&mut self) {
        for consumer in self.consumers.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| consumer.flush()));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[FLOG ERROR] Consumer '{}' flush failed: {}", consumer.name(), e);
                    self.metrics.record_consumer_failure();
                }
                Err(panic_info) => {
                    eprintln!(
                        "[FLOG CRITICAL] Consumer '{}' panicked during flush: {}",
                        consumer.name(),
                        panic_message(panic_info.as_ref())
                    );
                    self.metrics.record_consumer_failure();
                }
            }
        }
    }
}
