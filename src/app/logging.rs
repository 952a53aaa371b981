//! Progress logging utilities.

use log::info;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Completion counters for one chunk file.
///
/// `total` stays zero until the file has been read.
#[derive(Debug)]
pub struct FileProgress {
    path: PathBuf,
    total: AtomicUsize,
    completed: AtomicUsize,
}

impl FileProgress {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            total: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
    }

    /// Records one finished domain.
    pub fn inc(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        let total = self.total();
        total > 0 && self.completed() >= total
    }
}

/// Logs per-file and overall progress.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `files` - Progress counters of every chunk file in the run
pub fn log_progress(start_time: std::time::Instant, files: &[Arc<FileProgress>]) {
    for file in files.iter().filter(|f| f.total() > 0 && !f.is_finished()) {
        info!(
            "Processing domains in {}: {}/{}",
            file.path().display(),
            file.completed(),
            file.total()
        );
    }

    let completed: usize = files.iter().map(|f| f.completed()).sum();
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} domains in {:.2} seconds (~{:.2} domains/sec)",
        completed, elapsed_secs, rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_progress_counts() {
        let progress = FileProgress::new("chunk_1.csv");
        assert!(!progress.is_finished());

        progress.set_total(2);
        progress.inc();
        assert_eq!(progress.completed(), 1);
        assert!(!progress.is_finished());

        progress.inc();
        assert!(progress.is_finished());
    }

    #[test]
    fn test_log_progress_does_not_panic_on_empty() {
        log_progress(std::time::Instant::now(), &[]);
        let file = Arc::new(FileProgress::new("chunk_1.csv"));
        file.set_total(3);
        log_progress(std::time::Instant::now(), &[file]);
    }
}
