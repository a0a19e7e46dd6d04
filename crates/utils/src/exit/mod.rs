//! Controlled process exit.
//!
//! The host tool leaves the process through [`exit`], which runs every hook
//! registered with [`at_exit`] in reverse order first.
//!
//! ## Key Components
//!
//! - **`registry`**: `ExitHooks`, the process-wide instance, and the
//!   `at_exit` / `exit` entry points.
//! - **`signals`**: Routes SIGINT/SIGTERM into the same drain.

pub mod registry;
pub mod signals;

pub use registry::{at_exit, exit, hooks, ExitHooks, Hook};
pub use signals::install_signal_handlers;
