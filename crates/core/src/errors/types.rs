//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for exitkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for exitkit operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors, including profile destinations that cannot be set up.
    /// `source` is the failure the message adds context to, if any.
    Configuration {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Failures reported by a profiler backend
    Profiling { operation: String, message: String },

    /// Unsupported operation errors
    Unsupported { feature: String, message: String },

    /// An exit hook returned an error or panicked while the registry drained
    HookFailed { message: String },

    /// Text that could not be parsed as an integer
    InvalidNumber { value: String, message: String },
}
