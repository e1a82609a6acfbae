//! Error types for the logging engine

pub type Result<T> = std::result::Result<T, FlogError>;

#[derive(Debug, thiserror::Error)]
pub enum FlogError {
    /// A filter pattern failed to compile
    #[error("Invalid {axis} filter: {source}")]
    InvalidFilter {
        axis: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A custom timestamp pattern contains an unknown specifier
    #[error("Invalid timestamp format '{pattern}'")]
    InvalidTimestampFormat { pattern: String },

    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// A consumer could not handle an entry
    #[error("Consumer '{consumer}' failed: {message}")]
    ConsumerFailed { consumer: String, message: String },

    /// The drain thread could not be started
    #[error("Failed to spawn drain thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl FlogError {
    pub fn invalid_filter(axis: &'static str, source: regex::Error) -> Self {
        FlogError::InvalidFilter { axis, source }
    }

    pub fn invalid_timestamp_format(pattern: impl Into<String>) -> Self {
        FlogError::InvalidTimestampFormat {
            pattern: pattern.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        FlogError::IoOperation {
            operation: operation.into(),
            source,
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        FlogError::FileLockError { path: path.into() }
    }

    pub fn consumer(consumer: impl Into<String>, message: impl Into<String>) -> Self {
        FlogError::ConsumerFailed {
            consumer: consumer.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FlogError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FlogError::file_lock("/var/log/app.log");
        assert!(matches!(err, FlogError::FileLockError { .. }));

        let err = FlogError::consumer("stdout", "broken pipe");
        assert!(matches!(err, FlogError::ConsumerFailed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = FlogError::consumer("file", "Disk full");
        assert_eq!(err.to_string(), "Consumer 'file' failed: Disk full");

        let source = regex::Regex::new("(").expect_err("unbalanced group");
        let err = FlogError::invalid_filter("category", source);
        assert!(err.to_string().starts_with("Invalid category filter:"));
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = FlogError::io_operation("opening log file", io_err);

        assert!(matches!(err, FlogError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("access denied"));
    }
}
