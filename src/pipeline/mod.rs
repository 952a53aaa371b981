//! File pipelines: bounded fan-out over one chunk file's domains.
//!
//! Every pipeline draws permits from one shared semaphore, so the concurrency
//! limit bounds in-flight domain tasks across all files, not per file. A
//! permit is held by the spawned task and released when it finishes, even if
//! the task panics.

mod aggregate;

use std::path::Path;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{error, info, warn};
use tokio::sync::Semaphore;

use crate::app::FileProgress;
use crate::context::ResolutionContext;
use crate::domain::process_domain;
use crate::error_handling::ErrorType;
use crate::input::read_domains;
use crate::models::{ChunkBatch, DomainRows};

pub use aggregate::{Aggregators, BatchSender};

/// Resolves `domains` with at most `semaphore`'s permits in flight and
/// returns this file's IPv4 and IPv6 batches.
///
/// Every domain contributes at least one row per family. A domain task that
/// panics is replaced by `(domain, "", "")` rows.
pub async fn run_pipeline(
    domains: Vec<String>,
    semaphore: Arc<Semaphore>,
    ctx: Arc<ResolutionContext>,
    progress: Arc<FileProgress>,
) -> (ChunkBatch, ChunkBatch) {
    let mut ipv4 = ChunkBatch::new();
    let mut ipv6 = ChunkBatch::new();
    let mut tasks = FuturesUnordered::new();

    for domain in domains {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            // Only a caller closing its own semaphore lands here; the run never
            // closes the shared one. Remaining domains still get their rows.
            Err(_) => {
                warn!("Semaphore closed, recording {domain} as unresolved");
                let rows = DomainRows::unresolved(&domain);
                ipv4.extend(rows.ipv4);
                ipv6.extend(rows.ipv6);
                progress.inc();
                continue;
            }
        };

        let ctx = Arc::clone(&ctx);
        let progress = Arc::clone(&progress);
        let task_domain = domain.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            let rows = process_domain(&task_domain, &ctx).await;
            progress.inc();
            rows
        });
        tasks.push(async move { (domain, handle.await) });
    }

    while let Some((domain, result)) = tasks.next().await {
        let rows = match result {
            Ok(rows) => rows,
            Err(join_error) => {
                warn!("Task for domain {domain} panicked: {join_error:?}");
                ctx.stats.increment_error(ErrorType::DomainTaskPanic);
                progress.inc();
                DomainRows::unresolved(&domain)
            }
        };
        ipv4.extend(rows.ipv4);
        ipv6.extend(rows.ipv6);
    }

    (ipv4, ipv6)
}

/// Reads one chunk file, resolves its domains, and hands both batches to the
/// aggregators. Returns the number of domains in the file.
///
/// An unreadable or malformed file is logged and contributes nothing.
pub async fn process_file(
    path: &Path,
    semaphore: Arc<Semaphore>,
    ctx: Arc<ResolutionContext>,
    progress: Arc<FileProgress>,
    sender: BatchSender,
) -> usize {
    let owned_path = path.to_path_buf();
    let domains = match tokio::task::spawn_blocking(move || read_domains(&owned_path)).await {
        Ok(Ok(domains)) => domains,
        Ok(Err(e)) => {
            error!("Error reading chunk file: {e}");
            ctx.stats.increment_error(ErrorType::InputFileError);
            return 0;
        }
        Err(join_error) => {
            error!("Reading {} panicked: {join_error:?}", path.display());
            ctx.stats.increment_error(ErrorType::InputFileError);
            return 0;
        }
    };

    let count = domains.len();
    progress.set_total(count);
    info!("Processing {count} domains in {}", path.display());

    let (ipv4, ipv6) = run_pipeline(domains, semaphore, ctx, progress).await;
    sender
        .send(&path.display().to_string(), ipv4, ipv6)
        .await;
    count
}
