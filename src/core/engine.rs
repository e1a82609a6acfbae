//! Engine: shared state, configuration and the background drain thread
//!
//! Producers call [`Engine::submit`], which stamps the entry, appends it to
//! the double-buffered queue and signals the drain thread. The drain thread
//! is started lazily on the first submission and can be stopped with
//! [`Engine::kill_thread`]; the next submission starts a fresh one.
//!
//! Lock order: `drain_thread` before `signal`. The queue, the consumer
//! registry and the filter configuration each have their own lock and are
//! never held together with `signal`, except for the queue emptiness check
//! in [`Engine::flush`].

use super::{
    consumer::{Consumer, ConsumerRegistry},
    context::Context,
    entry::Entry,
    error::{FlogError, Result},
    filter::{FilterAxis, FilterConfig, Verdict},
    kind::Kind,
    metrics::EngineMetrics,
    queue::DoubleBufferedQueue,
    timestamp::TimestampFormat,
};
use crate::consumers::StdoutConsumer;
use parking_lot::{Condvar, Mutex, MutexGuard, RwLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle, ThreadId};

/// Name given to the drain thread unless the builder overrides it
pub const DEFAULT_THREAD_NAME: &str = "flog-drain";

/// Lifecycle of the drain thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No drain thread; the next submission starts one
    Stopped,
    /// A drain thread exists (or is being launched) and accepts work
    Running,
    /// `kill_thread` is draining the last swapped buffer
    Stopping,
}

#[derive(Debug, Default)]
struct Signal {
    logging: bool,
    work: bool,
    shutdown: bool,
    flush_requested: u64,
    flush_completed: u64,
    drain_thread: Option<ThreadId>,
}

impl Signal {
    fn is_drain_thread(&self) -> bool {
        self.drain_thread == Some(thread::current().id())
    }
}

struct Shared {
    queue: DoubleBufferedQueue<Entry>,
    consumers: ConsumerRegistry,
    config: RwLock<FilterConfig>,
    // Mirror of `config.verbosity` for lock-free call-site checks; only
    // written while the config write lock is held.
    verbosity: AtomicU8,
    signal: Mutex<Signal>,
    work_available: Condvar,
    cycle_done: Condvar,
    metrics: EngineMetrics,
    timestamp_format: TimestampFormat,
}

impl Shared {
    fn run(&self) {
        self.signal.lock().drain_thread = Some(thread::current().id());

        loop {
            let (shutdown, ticket) = {
                let mut signal = self.signal.lock();
                while !signal.work && !signal.shutdown {
                    self.work_available.wait(&mut signal);
                }
                signal.work = false;
                (signal.shutdown, signal.flush_requested)
            };

            self.drain_cycle();

            {
                let mut signal = self.signal.lock();
                if ticket > signal.flush_completed {
                    signal.flush_completed = ticket;
                }
            }
            self.cycle_done.notify_all();

            if shutdown {
                break;
            }
        }
    }

    /// Swap the queue and push every drained entry through filtering and fan-out.
    fn drain_cycle(&self) {
        let drained = self.queue.swap_and_drain();
        if drained.is_empty() {
            return;
        }

        let mut session = self.consumers.session(&self.metrics);
        for entry in drained {
            let verdict = self.config.read().apply(entry);
            match verdict {
                Verdict::Accept(entry) => {
                    session.dispatch(&entry);
                    self.metrics.record_dispatched();
                }
                Verdict::Reject(_) => {
                    self.metrics.record_filtered();
                }
            }
        }
        session.flush();
        self.metrics.record_drain_cycle();
    }
}

/// The asynchronous logging engine
///
/// # Example
///
/// ```
/// use flog::prelude::*;
///
/// let engine = Engine::builder()
///     .without_default_consumer()
///     .verbosity(Kind::Warning)
///     .build()
///     .unwrap();
///
/// engine.submit("disk full", Context::new("io"), Kind::Error);
/// engine.flush();
/// assert_eq!(engine.metrics().dispatched(), 1);
/// ```
pub struct Engine {
    shared: Arc<Shared>,
    drain_thread: Mutex<Option<JoinHandle<()>>>,
    thread_name: String,
}

impl Engine {
    /// Engine with the default configuration and a single stdout consumer
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(
            FilterConfig::default(),
            vec![Box::new(StdoutConsumer::new())],
            TimestampFormat::default(),
            DEFAULT_THREAD_NAME.to_string(),
        )
    }

    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Process-wide engine, created on first use
    ///
    /// Its drain thread is never joined automatically; call
    /// [`kill_thread`](Self::kill_thread) before leaving `main` if pending
    /// entries must be delivered.
    pub fn global() -> &'static Engine {
        static GLOBAL: OnceLock<Engine> = OnceLock::new();
        GLOBAL.get_or_init(Engine::new)
    }

    fn from_parts(
        config: FilterConfig,
        consumers: Vec<Box<dyn Consumer>>,
        timestamp_format: TimestampFormat,
        thread_name: String,
    ) -> Self {
        let registry = ConsumerRegistry::new();
        registry.replace(consumers);

        Self {
            shared: Arc::new(Shared {
                queue: DoubleBufferedQueue::new(),
                consumers: registry,
                verbosity: AtomicU8::new(config.verbosity as u8),
                config: RwLock::new(config),
                signal: Mutex::new(Signal::default()),
                work_available: Condvar::new(),
                cycle_done: Condvar::new(),
                metrics: EngineMetrics::new(),
                timestamp_format,
            }),
            drain_thread: Mutex::new(None),
            thread_name,
        }
    }

    /// Queue an entry for the drain thread.
    ///
    /// Never blocks on filtering or consumers. Starts the drain thread if it
    /// is not running.
    pub fn submit(&self, message: impl Into<String>, context: Context, kind: Kind) {
        let entry = Entry::stamped(kind, message, context, &self.shared.timestamp_format);
        self.shared.queue.push(entry);
        self.shared.metrics.record_submitted();

        let launch = {
            let mut signal = self.shared.signal.lock();
            signal.work = true;
            !std::mem::replace(&mut signal.logging, true)
        };
        if launch {
            self.launch_thread();
        }
        self.shared.work_available.notify_one();
    }

    #[inline]
    pub fn error(&self, category: &str, message: impl Into<String>) {
        self.submit(message, Context::new(category), Kind::Error);
    }

    #[inline]
    pub fn warning(&self, category: &str, message: impl Into<String>) {
        self.submit(message, Context::new(category), Kind::Warning);
    }

    #[inline]
    pub fn info(&self, category: &str, message: impl Into<String>) {
        self.submit(message, Context::new(category), Kind::Info);
    }

    fn launch_thread(&self) {
        let mut slot = self.drain_thread.lock();
        if slot.is_some() {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || shared.run());

        match spawned {
            Ok(handle) => *slot = Some(handle),
            Err(e) => {
                eprintln!("[FLOG ERROR] {}", FlogError::ThreadSpawn(e));
                let mut signal = self.shared.signal.lock();
                signal.logging = false;
                signal.flush_completed = signal.flush_requested;
                drop(signal);
                self.shared.cycle_done.notify_all();
            }
        }
    }

    /// Block until every entry submitted before this call has been dispatched.
    ///
    /// Entries submitted concurrently may or may not be included. Returns
    /// early if [`kill_thread`](Self::kill_thread) stops the engine in the
    /// meantime. Calling it from inside a consumer is a no-op.
    pub fn flush(&self) {
        let mut signal = self.shared.signal.lock();
        if signal.is_drain_thread() {
            return;
        }
        if !signal.logging {
            if self.shared.queue.is_empty() {
                return;
            }
            signal.logging = true;
            MutexGuard::unlocked(&mut signal, || self.launch_thread());
        }

        signal.flush_requested += 1;
        let ticket = signal.flush_requested;
        signal.work = true;
        self.shared.work_available.notify_one();

        while signal.flush_completed < ticket {
            self.shared.cycle_done.wait(&mut signal);
        }
    }

    /// Stop the drain thread after it drains what is already queued.
    ///
    /// Safe to call from any thread and when the engine is already stopped.
    /// Calling it from inside a consumer is a no-op.
    /// The next [`submit`](Self::submit) starts a new drain thread.
    pub fn kill_thread(&self) {
        if self.shared.signal.lock().is_drain_thread() {
            return;
        }

        let mut slot = self.drain_thread.lock();
        let Some(handle) = slot.take() else {
            return;
        };

        self.shared.signal.lock().shutdown = true;
        self.shared.work_available.notify_all();

        if handle.join().is_err() {
            eprintln!("[FLOG ERROR] Drain thread panicked during shutdown");
        }

        let mut signal = self.shared.signal.lock();
        signal.shutdown = false;
        signal.logging = false;
        signal.drain_thread = None;
        signal.flush_completed = signal.flush_requested;
        drop(signal);
        self.shared.cycle_done.notify_all();
    }

    pub fn state(&self) -> EngineState {
        let signal = self.shared.signal.lock();
        match (signal.logging, signal.shutdown) {
            (false, _) => EngineState::Stopped,
            (true, false) => EngineState::Running,
            (true, true) => EngineState::Stopping,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Append a consumer; it sees entries from the next drain cycle on.
    pub fn register_consumer(&self, consumer: Box<dyn Consumer>) {
        self.shared.consumers.register(consumer);
    }

    /// Remove every consumer, including the default one.
    pub fn clear_consumers(&self) {
        self.shared.consumers.clear();
    }

    pub fn consumer_count(&self) -> usize {
        self.shared.consumers.len()
    }

    pub fn consumer_names(&self) -> Vec<String> {
        self.shared.consumers.names()
    }

    pub fn set_verbosity(&self, kind: Kind) {
        let mut config = self.shared.config.write();
        config.verbosity = kind;
        self.shared.verbosity.store(kind as u8, Ordering::Relaxed);
    }

    /// Current threshold, read without touching the configuration lock.
    ///
    /// Entries are still checked against the configuration in force when
    /// they are drained.
    pub fn verbosity(&self) -> Kind {
        Kind::from_u8(self.shared.verbosity.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Keep filename and line in dispatched entries. Off by default.
    pub fn report_filenames(&self, enabled: bool) {
        self.shared.config.write().report_filenames = enabled;
    }

    /// Keep the function name in dispatched entries. On by default.
    pub fn report_functions(&self, enabled: bool) {
        self.shared.config.write().report_functions = enabled;
    }

    /// Install a regex filter on one axis.
    ///
    /// An invalid pattern is reported here and the previous filter stays.
    pub fn set_filter(&self, axis: FilterAxis, pattern: &str) -> Result<()> {
        let regex = axis.compile(pattern)?;
        self.shared.config.write().set_filter(axis, Some(regex));
        Ok(())
    }

    /// Drop entries whose category does not match `pattern`.
    pub fn set_category_filter(&self, pattern: &str) -> Result<()> {
        self.set_filter(FilterAxis::Category, pattern)
    }

    /// Drop entries whose filename does not match `pattern`.
    pub fn set_filename_filter(&self, pattern: &str) -> Result<()> {
        self.set_filter(FilterAxis::Filename, pattern)
    }

    /// Drop entries whose message text does not match `pattern`.
    pub fn set_error_string_filter(&self, pattern: &str) -> Result<()> {
        self.set_filter(FilterAxis::Message, pattern)
    }

    pub fn clear_filters(&self) {
        self.shared.config.write().clear_filters();
    }

    /// Snapshot of the current filter configuration
    pub fn config(&self) -> FilterConfig {
        self.shared.config.read().clone()
    }

    /// Restore the default configuration and the single stdout consumer.
    pub fn reset(&self) {
        {
            let mut config = self.shared.config.write();
            *config = FilterConfig::default();
            self.shared
                .verbosity
                .store(config.verbosity as u8, Ordering::Relaxed);
        }
        let previous = self
            .shared
            .consumers
            .replace(vec![Box::new(StdoutConsumer::new())]);
        drop(previous);
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.shared.metrics
    }

    /// Entries waiting for the next drain cycle
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.kill_thread();
    }
}

/// Builder for constructing an [`Engine`] with a fluent API
///
/// # Example
/// ```
/// use flog::prelude::*;
///
/// let engine = Engine::builder()
///     .verbosity(Kind::Warning)
///     .report_filenames(true)
///     .category_filter("^net")
///     .without_default_consumer()
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.verbosity(), Kind::Warning);
/// assert_eq!(engine.consumer_count(), 0);
/// ```
pub struct EngineBuilder {
    config: FilterConfig,
    patterns: Vec<(FilterAxis, String)>,
    consumers: Vec<Box<dyn Consumer>>,
    default_consumer: bool,
    timestamp_format: TimestampFormat,
    thread_name: String,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: FilterConfig::default(),
            patterns: Vec::new(),
            consumers: Vec::new(),
            default_consumer: true,
            timestamp_format: TimestampFormat::default(),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, kind: Kind) -> Self {
        self.config.verbosity = kind;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_filenames(mut self, enabled: bool) -> Self {
        self.config.report_filenames = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_functions(mut self, enabled: bool) -> Self {
        self.config.report_functions = enabled;
        self
    }

    /// Compiled in [`build`](Self::build); an invalid pattern fails the build.
    #[must_use = "builder methods return a new value"]
    pub fn category_filter(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push((FilterAxis::Category, pattern.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filename_filter(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push((FilterAxis::Filename, pattern.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn message_filter(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push((FilterAxis::Message, pattern.into()));
        self
    }

    /// Add a consumer after the default one (if kept)
    #[must_use = "builder methods return a new value"]
    pub fn consumer<C: Consumer + 'static>(mut self, consumer: C) -> Self {
        self.consumers.push(Box::new(consumer));
        self
    }

    /// Start without the stdout consumer
    #[must_use = "builder methods return a new value"]
    pub fn without_default_consumer(mut self) -> Self {
        self.default_consumer = false;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Fails on an invalid filter pattern or custom timestamp pattern.
    pub fn build(self) -> Result<Engine> {
        self.timestamp_format.validate()?;

        let mut config = self.config;
        for (axis, pattern) in &self.patterns {
            config.set_filter(*axis, Some(axis.compile(pattern)?));
        }

        let mut consumers: Vec<Box<dyn Consumer>> = Vec::with_capacity(self.consumers.len() + 1);
        if self.default_consumer {
            consumers.push(Box::new(StdoutConsumer::new()));
        }
        consumers.extend(self.consumers);

        Ok(Engine::from_parts(
            config,
            consumers,
            self.timestamp_format,
            self.thread_name,
        ))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
