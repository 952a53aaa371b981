//! Shared state handed to every domain task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error_handling::{ErrorType, ProcessingStats, ResolverError};
use crate::resolver::Resolver;

/// Resolver backend, per-query timeout, and statistics shared by all tasks.
pub struct ResolutionContext {
    pub resolver: Arc<dyn Resolver>,
    pub query_timeout: Duration,
    pub stats: Arc<ProcessingStats>,
}

impl ResolutionContext {
    pub fn new(
        resolver: Arc<dyn Resolver>,
        query_timeout: Duration,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            resolver,
            query_timeout,
            stats,
        }
    }

    /// Runs one resolver query under the per-query timeout.
    ///
    /// Failures are counted against `error_type`; timeouts are counted as
    /// [`ErrorType::QueryTimeout`] instead.
    pub async fn query<F>(&self, error_type: ErrorType, query: F) -> Result<String, ResolverError>
    where
        F: Future<Output = Result<String, ResolverError>>,
    {
        let result = match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result,
            Err(_) => Err(ResolverError::Timeout(self.query_timeout)),
        };
        match &result {
            Err(ResolverError::Timeout(_)) => self.stats.increment_error(ErrorType::QueryTimeout),
            Err(_) => self.stats.increment_error(error_type),
            Ok(_) => {}
        }
        result
    }
}
