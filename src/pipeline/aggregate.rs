//! Fan-in of per-file batches into the two process-wide result tables.
//!
//! Each address family has one merge task that exclusively owns its
//! [`ResultTable`]. File pipelines hand batches over a channel, so appends are
//! serialized by ownership rather than by a lock. A merge task finishes once
//! every [`BatchSender`] clone has been dropped and the channel is drained.

use log::{info, warn};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::models::{ChunkBatch, ResultTable};
use crate::resolver::AddressFamily;

/// Batches buffered per family before senders wait.
const BATCH_CHANNEL_CAPACITY: usize = 16;

/// Hands a file pipeline's batches to the merge tasks.
#[derive(Clone)]
pub struct BatchSender {
    ipv4: mpsc::Sender<ChunkBatch>,
    ipv6: mpsc::Sender<ChunkBatch>,
}

impl BatchSender {
    /// Sends both batches of one file.
    ///
    /// A closed channel means the merge task is gone; the batch is dropped
    /// with a warning.
    pub async fn send(&self, source: &str, ipv4: ChunkBatch, ipv6: ChunkBatch) {
        info!(
            "Sending {} IPv4 records and {} IPv6 records to results channels from file {source}",
            ipv4.len(),
            ipv6.len()
        );
        if self.ipv4.send(ipv4).await.is_err() {
            warn!("IPv4 results channel closed, dropping batch from {source}");
        }
        if self.ipv6.send(ipv6).await.is_err() {
            warn!("IPv6 results channel closed, dropping batch from {source}");
        }
    }
}

/// The two running merge tasks.
pub struct Aggregators {
    ipv4: JoinHandle<ResultTable>,
    ipv6: JoinHandle<ResultTable>,
}

impl Aggregators {
    /// Starts both merge tasks and returns the sender pipelines clone from.
    pub fn start() -> (BatchSender, Aggregators) {
        let (ipv4_tx, ipv4_rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);
        let (ipv6_tx, ipv6_rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);

        let aggregators = Aggregators {
            ipv4: tokio::spawn(merge_batches(AddressFamily::V4, ipv4_rx)),
            ipv6: tokio::spawn(merge_batches(AddressFamily::V6, ipv6_rx)),
        };
        let sender = BatchSender {
            ipv4: ipv4_tx,
            ipv6: ipv6_tx,
        };
        (sender, aggregators)
    }

    /// Waits for both tables to be complete.
    ///
    /// Only resolves after every `BatchSender` has been dropped.
    pub async fn finish(self) -> Result<(ResultTable, ResultTable), JoinError> {
        let ipv4 = self.ipv4.await?;
        let ipv6 = self.ipv6.await?;
        Ok((ipv4, ipv6))
    }
}

async fn merge_batches(family: AddressFamily, mut batches: mpsc::Receiver<ChunkBatch>) -> ResultTable {
    let mut table = ResultTable::new();
    while let Some(batch) = batches.recv().await {
        info!("Received {} {family} records, processing...", batch.len());
        table.extend(batch);
        info!("Total {family} records in results: {}", table.len());
    }
    table
}
