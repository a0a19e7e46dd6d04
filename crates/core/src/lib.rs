//! Core errors, constants, and the fatal-abort path for `exitkit`.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum and `Result` alias shared by every crate in
//!   the workspace.
//! - **`fatal`**: The single function through which an unrecoverable failure
//!   ends the process. It skips the exit hook drain.
//! - **`constants`**: Exit codes and environment variable names.

pub mod constants;
pub mod errors;
pub mod fatal;

pub use self::{
    constants::*,
    errors::{Error, IoResultExt, Result, ResultExt},
};
