//! Call-site macros.
//!
//! Each macro captures the file, line and module path of the call site and
//! formats its message like `format!`. `log_warning!` and `log_info!` skip
//! formatting entirely when the engine's verbosity already excludes them.
//!
//! The `no-error`, `no-warning` and `no-info` cargo features compile the
//! corresponding macro down to nothing, so the engine never sees those
//! entries.
//!
//! # Examples
//!
//! ```
//! use flog::prelude::*;
//! use flog::{log_info, log_warning};
//!
//! let engine = Engine::builder().without_default_consumer().build().unwrap();
//!
//! log_info!(engine, "net", "Server listening on port {}", 8080);
//! engine.set_verbosity(Kind::Error);
//! log_warning!(engine, "net", "never formatted: {}", 1);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __flog_context {
    ($category:expr) => {
        $crate::Context::new($category)
            .with_location(file!(), line!())
            .with_function(module_path!())
    };
}

/// Submit an error entry.
///
/// Errors are never skipped at the call site; only the filter stage can
/// drop them.
#[cfg(not(feature = "no-error"))]
#[macro_export]
macro_rules! log_error {
    ($engine:expr, $category:expr, $($arg:tt)+) => {
        $engine.submit(
            format!($($arg)+),
            $crate::__flog_context!($category),
            $crate::Kind::Error,
        )
    };
}

#[cfg(feature = "no-error")]
#[macro_export]
macro_rules! log_error {
    ($engine:expr, $category:expr, $($arg:tt)+) => {
        ()
    };
}

/// Submit a warning entry if the current verbosity admits warnings.
#[cfg(not(feature = "no-warning"))]
#[macro_export]
macro_rules! log_warning {
    ($engine:expr, $category:expr, $($arg:tt)+) => {{
        let engine = &$engine;
        if $crate::Kind::Warning.admits(engine.verbosity()) {
            engine.submit(
                format!($($arg)+),
                $crate::__flog_context!($category),
                $crate::Kind::Warning,
            );
        }
    }};
}

#[cfg(feature = "no-warning")]
#[macro_export]
macro_rules! log_warning {
    ($engine:expr, $category:expr, $($arg:tt)+) => {
        ()
    };
}

/// Submit an info entry if the current verbosity admits info.
#[cfg(not(feature = "no-info"))]
#[macro_export]
macro_rules! log_info {
    ($engine:expr, $category:expr, $($arg:tt)+) => {{
        let engine = &$engine;
        if $crate::Kind::Info.admits(engine.verbosity()) {
            engine.submit(
                format!($($arg)+),
                $crate::__flog_context!($category),
                $crate::Kind::Info,
            );
        }
    }};
}

#[cfg(feature = "no-info")]
#[macro_export]
macro_rules! log_info {
    ($engine:expr, $category:expr, $($arg:tt)+) => {
        ()
    };
}

#[cfg(all(test, not(any(feature = "no-error", feature = "no-warning", feature = "no-info"))))]
mod tests {
    use crate::consumers::ChannelConsumer;
    use crate::core::{Engine, Kind};

    fn engine() -> (Engine, crossbeam_channel::Receiver<crate::Entry>) {
        let (consumer, receiver) = ChannelConsumer::unbounded();
        let engine = Engine::builder()
            .without_default_consumer()
            .consumer(consumer)
            .report_filenames(true)
            .build()
            .unwrap();
        (engine, receiver)
    }

    #[test]
    fn test_macros_capture_call_site() {
        let (engine, receiver) = engine();
        log_error!(engine, "io", "Code: {}", 500);
        engine.flush();

        let entry = receiver.try_recv().unwrap();
        assert_eq!(entry.message, "Code: 500");
        assert_eq!(entry.kind, Kind::Error);
        assert_eq!(entry.context.category, "io");
        assert_eq!(entry.context.filename.as_deref(), Some(file!()));
        assert!(entry.context.line.is_some());
        assert_eq!(entry.context.function.as_deref(), Some(module_path!()));
    }

    #[test]
    fn test_macros_respect_verbosity_at_call_site() {
        let (engine, receiver) = engine();
        engine.set_verbosity(Kind::Warning);

        log_info!(engine, "ui", "hidden");
        log_warning!(engine, "ui", "Retry {} of {}", 1, 3);
        engine.flush();

        let messages: Vec<String> = receiver.try_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["Retry 1 of 3"]);
        assert_eq!(engine.metrics().submitted(), 1);
    }
}
