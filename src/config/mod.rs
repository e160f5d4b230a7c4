//! Configuration module.
//!
//! Contains CLI/library configuration types and operational constants.

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
