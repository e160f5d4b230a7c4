//! Shared utilities.

mod sanitize;

pub use sanitize::{sanitize_error_message, sanitize_filename};
