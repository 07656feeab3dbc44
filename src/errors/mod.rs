//! Error handling for the application shell.

mod types;

pub use types::{Error, Result};
