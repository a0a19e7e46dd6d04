//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a profiler backend error
    #[must_use]
    pub fn profiling(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Profiling {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    #[must_use]
    pub fn unsupported(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Unsupported {
            feature: feature.into(),
            message: message.into(),
        }
    }

    /// Create an exit hook failure
    #[must_use]
    pub fn hook_failed(message: impl Into<String>) -> Self {
        Error::HookFailed {
            message: message.into(),
        }
    }

    /// Create an integer parsing error
    #[must_use]
    pub fn invalid_number(value: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidNumber {
            value: value.into(),
            message: message.into(),
        }
    }
}
