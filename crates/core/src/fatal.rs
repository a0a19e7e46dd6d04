//! The fatal-abort path.
//!
//! Every unrecoverable condition in exitkit ends up here: a profile
//! destination that cannot be created at start-up, or an exit hook that fails
//! while the registry drains. The process ends immediately with
//! [`FATAL_EXIT_CODE`] and the remaining exit hooks are not run.

use crate::constants::{APP_NAME, FATAL_EXIT_CODE};
use crate::errors::Error;
use std::io::Write;

/// Report `error` and end the process without draining exit hooks.
pub fn abort(error: &Error) -> ! {
    tracing::error!(error = %error, "fatal error, exiting without cleanup");
    let _ = std::io::stdout().flush();
    eprintln!("{}", report_line(error));
    std::process::exit(FATAL_EXIT_CODE)
}

/// The single line written to stderr for a fatal error.
pub fn report_line(error: &Error) -> String {
    format!("{APP_NAME}: {error}")
}
