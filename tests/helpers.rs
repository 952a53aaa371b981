// Shared test helpers: a scripted Resolver double and chunk file fixtures.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ns_harvest::error_handling::ResolverError;
use ns_harvest::{AddressFamily, Config, DomainRecord, Resolver};

/// Canned outcome of one query.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Not every test file uses every outcome
pub enum Outcome {
    Answer(String),
    Fail,
    Hang,
}

/// Resolver double answering from fixed tables.
///
/// Unscripted queries succeed with empty output. Every query sleeps for
/// `delay` while counted as in flight, so tests can observe the peak number
/// of concurrent entrants.
#[derive(Default)]
pub struct FakeResolver {
    ns: HashMap<String, Outcome>,
    addresses: HashMap<(String, AddressFamily), Outcome>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[allow(dead_code)] // Used by other test files
impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ns(mut self, name: &str, outcome: Outcome) -> Self {
        self.ns.insert(name.to_string(), outcome);
        self
    }

    /// Scripts an NS answer listing `nameservers`, with no additional section.
    pub fn nameservers(self, domain: &str, nameservers: &[&str]) -> Self {
        let answer = nameservers
            .iter()
            .map(|ns| format!("{domain}.\t\t172800\tIN\tNS\t{ns}\n"))
            .collect();
        self.ns(domain, Outcome::Answer(answer))
    }

    pub fn addresses(mut self, name: &str, family: AddressFamily, outcome: Outcome) -> Self {
        self.addresses.insert((name.to_string(), family), outcome);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, outcome: Option<Outcome>) -> Result<String, ResolverError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match outcome {
            None => Ok(String::new()),
            Some(Outcome::Answer(text)) => Ok(text),
            Some(Outcome::Fail) => Err(ResolverError::Lookup("scripted failure".into())),
            Some(Outcome::Hang) => std::future::pending().await,
        }
    }
}

/// Decrements the in-flight count even when a timed-out query is dropped.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Resolver for FakeResolver {
    async fn query_ns(&self, name: &str) -> Result<String, ResolverError> {
        self.answer(self.ns.get(name).cloned()).await
    }

    async fn query_addresses(
        &self,
        name: &str,
        family: AddressFamily,
    ) -> Result<String, ResolverError> {
        self.answer(self.addresses.get(&(name.to_string(), family)).cloned())
            .await
    }
}

/// Writes a chunk file with a `domain` header followed by `domains`.
#[allow(dead_code)] // Used by other test files
pub fn write_chunk(dir: &Path, name: &str, domains: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::from("domain\n");
    for domain in domains {
        contents.push_str(domain);
        contents.push('\n');
    }
    std::fs::write(&path, contents).expect("Failed to write chunk file");
    path
}

/// Config reading `input_dir` and writing into `output_dir`.
#[allow(dead_code)] // Used by other test files
pub fn test_config(input_dir: &Path, output_dir: &Path) -> Config {
    Config {
        input_dir: input_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        query_timeout_secs: 5,
        ..Default::default()
    }
}

/// Reads an output table back, checking its header.
#[allow(dead_code)] // Used by other test files
pub fn read_table(path: &Path) -> Vec<DomainRecord> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open output table");
    let headers = reader.headers().expect("Missing header").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["domain", "NS", "IP"]);

    reader
        .records()
        .map(|record| {
            let record = record.expect("Malformed output row");
            DomainRecord::new(&record[0], &record[1], &record[2])
        })
        .collect()
}
