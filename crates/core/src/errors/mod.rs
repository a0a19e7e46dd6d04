//! Error types and result extensions for exitkit operations

mod builders;
mod display;
mod extensions;
mod types;

pub use extensions::*;
pub use types::{Error, Result};
