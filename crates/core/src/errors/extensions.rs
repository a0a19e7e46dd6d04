//! Extension traits for attaching context to failures

use super::types::{Error, Result};
use std::path::PathBuf;

/// Turn a failure into a configuration error that keeps it as its source.
pub trait ResultExt<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| Error::Configuration {
            message: f(),
            source: Some(Box::new(source)),
        })
    }
}

/// Name the file and operation behind an I/O failure.
pub trait IoResultExt<T> {
    /// `path` may be empty when only an open handle is at hand.
    fn fs_context(self, path: impl Into<PathBuf>, operation: &str) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn fs_context(self, path: impl Into<PathBuf>, operation: &str) -> Result<T> {
        self.map_err(|e| Error::file_system(path, operation, e))
    }
}
