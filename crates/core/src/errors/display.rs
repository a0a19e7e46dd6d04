//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message, source } => match source {
                Some(source) => write!(f, "configuration error: {message}: {source}"),
                None => write!(f, "configuration error: {message}"),
            },
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                if path.as_os_str().is_empty() {
                    write!(f, "file system {operation} operation failed: {source}")
                } else {
                    write!(
                        f,
                        "file system {} operation failed for '{}': {}",
                        operation,
                        path.display(),
                        source
                    )
                }
            }
            Error::Profiling { operation, message } => {
                write!(f, "profiler failed to {operation}: {message}")
            }
            Error::Unsupported { feature, message } => {
                write!(f, "{feature} is not supported: {message}")
            }
            Error::HookFailed { message } => {
                write!(f, "exit hook failed: {message}")
            }
            Error::InvalidNumber { value, message } => {
                write!(f, "invalid number '{value}': {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_system_display_includes_path() {
        let err = Error::FileSystem {
            path: PathBuf::from("/tmp/cpu.prof"),
            operation: "create".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "file system create operation failed for '/tmp/cpu.prof': denied"
        );
    }

    #[test]
    fn test_file_system_display_without_path() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::file_system("", "write CPU profile", io);
        assert_eq!(
            err.to_string(),
            "file system write CPU profile operation failed: boom"
        );
    }

    #[test]
    fn test_configuration_display_appends_source() {
        let err = Error::Configuration {
            message: "cannot start heap profile 'mem.prof'".to_string(),
            source: Some(Box::new(Error::unsupported("heap profiling", "no jemalloc"))),
        };
        assert_eq!(
            err.to_string(),
            "configuration error: cannot start heap profile 'mem.prof': \
             heap profiling is not supported: no jemalloc"
        );
    }

    #[test]
    fn test_hook_failed_display() {
        let err = Error::hook_failed("write heap profile");
        assert_eq!(err.to_string(), "exit hook failed: write heap profile");
    }
}
