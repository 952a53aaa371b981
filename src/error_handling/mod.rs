//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, resolver, input, and output failures
//! - Processing statistics tracking (errors and info metrics)
//!
//! Resolver and input errors are always absorbed into empty-result rows.
//! Only initialization and output errors surface from a run.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, InputError, OutputError, ResolverError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::NsQueryError);
        assert_eq!(stats.get_error_count(ErrorType::NsQueryError), 1);

        stats.increment_info(InfoType::EmptyAddressAnswer);
        assert_eq!(stats.get_info_count(InfoType::EmptyAddressAnswer), 1);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::AQueryError);
        stats.increment_error(ErrorType::QueryTimeout);
        stats.increment_info(InfoType::NoNameservers);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        let stats = std::sync::Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_error(ErrorType::AaaaQueryError);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_error_count(ErrorType::AaaaQueryError), 800);
    }

    #[test]
    fn test_resolver_error_display() {
        let err = ResolverError::Timeout(std::time::Duration::from_secs(3));
        assert_eq!(err.to_string(), "query timed out after 3s");

        let err = ResolverError::Lookup("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }
}
