//! ns_harvest library: authoritative nameserver resolution for domain batches
//!
//! Given a directory of chunk files (CSV, one domain per row), this library
//! resolves every domain's authoritative nameservers and each nameserver's
//! IPv4/IPv6 addresses, then writes two flat `domain,NS,IP` tables.
//!
//! # Example
//!
//! ```no_run
//! use ns_harvest::{Config, run_resolution};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input_dir: std::path::PathBuf::from("chunk-data"),
//!     max_concurrency: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_resolution(config).await?;
//! println!("{} domains -> {} IPv4 rows, {} IPv6 rows",
//!          report.total_domains, report.ipv4_records, report.ipv6_records);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod app;
pub mod config;
pub mod context;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod resolver;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use config::{Backend, Config, LogFormat, LogLevel, Opt};
pub use models::{DomainRecord, DomainRows, NameserverSet};
pub use resolver::{AddressFamily, Resolver};
pub use run::{run_resolution, run_resolution_with, ResolutionReport};

// Internal run module (contains the orchestration of all file pipelines)
mod run {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{error, info, warn};
    use tokio::task::JoinError;
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, print_error_statistics, shutdown_gracefully, FileProgress};
    use crate::config::Config;
    use crate::context::ResolutionContext;
    use crate::error_handling::{ErrorType, ProcessingStats};
    use crate::export::{write_results, OutputPaths};
    use crate::initialization::{init_resolver, init_semaphore};
    use crate::input::discover_chunk_files;
    use crate::pipeline::{process_file, Aggregators};
    use crate::resolver::Resolver;

    /// Results of a resolution run.
    #[derive(Debug, Clone)]
    pub struct ResolutionReport {
        /// Number of chunk files discovered
        pub files: usize,
        /// Number of domains read across all readable chunk files
        pub total_domains: usize,
        /// Rows written to the IPv4 table
        pub ipv4_records: usize,
        /// Rows written to the IPv6 table
        pub ipv6_records: usize,
        /// Locations of the two tables
        pub output: OutputPaths,
        /// Errors absorbed during the run (failed queries, unreadable files, panics)
        pub errors: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a resolution with the backend selected in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the backend cannot be
    /// built, the input directory cannot be listed, or the results cannot be
    /// written. Per-domain and per-file failures never surface here.
    pub async fn run_resolution(config: Config) -> Result<ResolutionReport> {
        config.validate().context("Invalid configuration")?;
        let resolver = init_resolver(&config).context("Failed to initialize DNS resolver")?;
        run_resolution_with(config, resolver).await
    }

    /// Runs a resolution against an explicit Resolver backend.
    ///
    /// Starts one file pipeline per chunk file and both merge tasks, waits for
    /// every pipeline, then for the merge tasks to drain, and only then writes
    /// the tables.
    pub async fn run_resolution_with(
        config: Config,
        resolver: Arc<dyn Resolver>,
    ) -> Result<ResolutionReport> {
        config.validate().context("Invalid configuration")?;
        let start_time = Instant::now();

        let input_dir = config.input_dir.clone();
        let file_pattern = config.file_pattern.clone();
        let files = tokio::task::spawn_blocking(move || {
            discover_chunk_files(&input_dir, &file_pattern)
        })
        .await
        .context("Chunk file discovery task failed")?
        .context("Failed to discover chunk files")?;
        if files.is_empty() {
            warn!(
                "No files matching {} found in {}",
                config.file_pattern,
                config.input_dir.display()
            );
        } else {
            info!(
                "Found {} chunk files in {}",
                files.len(),
                config.input_dir.display()
            );
        }

        let semaphore = init_semaphore(config.max_concurrency);
        let stats = Arc::new(ProcessingStats::new());
        let ctx = Arc::new(ResolutionContext::new(
            resolver,
            config.query_timeout(),
            Arc::clone(&stats),
        ));
        let progress: Vec<Arc<FileProgress>> = files
            .iter()
            .map(|path| Arc::new(FileProgress::new(path)))
            .collect();

        let (sender, aggregators) = Aggregators::start();

        let cancel = CancellationToken::new();
        let cancel_logging = cancel.child_token();
        let progress_for_logging = progress.clone();
        let logging_interval = Duration::from_secs(config.progress_interval_secs);
        let logging_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(logging_interval);
            // First tick completes immediately
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &progress_for_logging);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        }));

        let mut pipelines = FuturesUnordered::new();
        for (path, file_progress) in files.iter().zip(&progress) {
            let path = path.clone();
            let semaphore = Arc::clone(&semaphore);
            let ctx = Arc::clone(&ctx);
            let file_progress = Arc::clone(file_progress);
            let sender = sender.clone();
            pipelines.push(tokio::spawn(async move {
                process_file(&path, semaphore, ctx, file_progress, sender).await
            }));
        }
        // Merge tasks end once every pipeline's clone is gone too
        drop(sender);

        let mut total_domains = 0;
        while let Some(result) = pipelines.next().await {
            total_domains += pipeline_domain_count(result, &stats);
        }

        let (ipv4, ipv6) = aggregators
            .finish()
            .await
            .context("Result aggregation task failed")?;

        shutdown_gracefully(cancel, logging_task).await;
        log_progress(start_time, &progress);

        let output = write_results(&config.output_dir, &ipv4, &ipv6)
            .context("Failed to write results")?;

        print_error_statistics(&stats);

        Ok(ResolutionReport {
            files: files.len(),
            total_domains,
            ipv4_records: ipv4.len(),
            ipv6_records: ipv6.len(),
            output,
            errors: stats.total_errors(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Domain count of a finished file pipeline.
    ///
    /// A panicked pipeline loses all of its rows; it is counted so the loss
    /// shows up in the final statistics.
    fn pipeline_domain_count(result: Result<usize, JoinError>, stats: &ProcessingStats) -> usize {
        match result {
            Ok(count) => count,
            Err(join_error) => {
                error!("File pipeline panicked, its rows are lost: {join_error:?}");
                stats.increment_error(ErrorType::FilePipelinePanic);
                0
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_panicked_pipeline_is_counted() {
            let stats = ProcessingStats::new();
            let panicked = tokio::spawn(async { None::<usize>.expect("pipeline failure") }).await;

            assert_eq!(pipeline_domain_count(panicked, &stats), 0);
            assert_eq!(stats.get_error_count(ErrorType::FilePipelinePanic), 1);
        }

        #[tokio::test]
        async fn test_finished_pipeline_reports_its_domains() {
            let stats = ProcessingStats::new();
            assert_eq!(pipeline_domain_count(Ok(12), &stats), 12);
            assert_eq!(stats.total_errors(), 0);
        }
    }
}
