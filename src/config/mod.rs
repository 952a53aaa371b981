//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (concurrency, timeouts, file locations)
//! - Library configuration and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Backend, Config, LogFormat, LogLevel, Opt};
