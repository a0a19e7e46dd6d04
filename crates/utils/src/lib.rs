//! Shared utilities for exitkit
//!
//! The centrepiece is the exit hook registry in [`exit`]: the one sanctioned
//! way for the host tool to leave the process. The [`text`] helpers are pure
//! functions with no state.

pub mod exit;
pub mod logging;
pub mod text;

pub use exit::{at_exit, exit, hooks, ExitHooks, Hook};
