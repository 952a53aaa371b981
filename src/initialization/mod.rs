//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - Resolver backend
//! - The global concurrency permit pool

mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes a semaphore for controlling concurrency.
///
/// One permit is held per in-flight domain task. The same semaphore is shared
/// by every file pipeline, so the bound is global.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent domain tasks allowed
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
