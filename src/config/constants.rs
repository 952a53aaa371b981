//! Configuration constants.
//!
//! Defaults for the resolution run: concurrency, timeouts, file locations, and
//! the markers used when reading resolver output.

/// Maximum number of domains resolved concurrently across all chunk files
pub const SEMAPHORE_LIMIT: usize = 50;

/// Per-query timeout in seconds.
/// A hung resolver call otherwise holds its concurrency permit forever.
pub const DNS_TIMEOUT_SECS: u64 = 10;

/// Number of attempts the library backend makes per query
pub const DNS_ATTEMPTS: usize = 2;

/// Seconds between progress log lines
pub const LOGGING_INTERVAL: u64 = 5;

pub const DEFAULT_INPUT_DIR: &str = "chunk-data";
pub const DEFAULT_FILE_PATTERN: &str = "chunk_*.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_DIG_PATH: &str = "dig";

pub const IPV4_OUTPUT_FILE: &str = "auth-ns-ipv4.csv";
pub const IPV6_OUTPUT_FILE: &str = "auth-ns-ipv6.csv";

/// Header row of both output tables
pub const OUTPUT_HEADER: [&str; 3] = ["domain", "NS", "IP"];

// Resolver output markers
pub const ADDITIONAL_SECTION_MARKER: &str = ";; ADDITIONAL SECTION:";
/// Prefix of the version banner dig prints on its first line.
/// The banner echoes the query, so it can look like an NS record line.
pub const DIG_BANNER_MARKER: &str = "<<>> DiG";
