//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DIG_PATH, DEFAULT_FILE_PATTERN, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
    DNS_TIMEOUT_SECS, LOGGING_INTERVAL, SEMAPHORE_LIMIT,
};
use crate::error_handling::InitializationError;

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which Resolver backend answers NS/A/AAAA queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Invoke the system `dig` binary
    Dig,
    /// Query through hickory-resolver using the system-independent default config
    Hickory,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ns_harvest::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input_dir: PathBuf::from("chunk-data"),
///     max_concurrency: 100,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the chunk files
    pub input_dir: PathBuf,

    /// Glob-style file name pattern (`*` and `?`) selecting chunk files
    pub file_pattern: String,

    /// Directory the two result tables are written to
    pub output_dir: PathBuf,

    /// Maximum domains resolved concurrently, across all chunk files
    pub max_concurrency: usize,

    /// Timeout for a single resolver query, in seconds
    pub query_timeout_secs: u64,

    /// Resolver backend
    pub backend: Backend,

    /// Path to the `dig` binary (dig backend only)
    pub dig_path: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Seconds between progress log lines
    pub progress_interval_secs: u64,
}

impl Config {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Rejects values that would stall the run before any work starts.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.max_concurrency == 0 {
            return Err(InitializationError::ConfigError(
                "max_concurrency must be at least 1".into(),
            ));
        }
        if self.query_timeout_secs == 0 {
            return Err(InitializationError::ConfigError(
                "query_timeout_secs must be at least 1".into(),
            ));
        }
        if self.progress_interval_secs == 0 {
            return Err(InitializationError::ConfigError(
                "progress_interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_concurrency: SEMAPHORE_LIMIT,
            query_timeout_secs: DNS_TIMEOUT_SECS,
            backend: Backend::Dig,
            dig_path: PathBuf::from(DEFAULT_DIG_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            progress_interval_secs: LOGGING_INTERVAL,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// ns_harvest --dir chunk-data
///
/// # Library backend, higher concurrency
/// ns_harvest --dir chunk-data --backend hickory --max-concurrency 200
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ns_harvest",
    about = "Resolves authoritative nameservers and their IPv4/IPv6 addresses for chunked domain lists."
)]
pub struct Opt {
    /// The directory containing chunk files
    #[arg(long = "dir", value_parser, default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Chunk file name pattern
    #[arg(long, default_value = DEFAULT_FILE_PATTERN)]
    pub pattern: String,

    /// Directory for auth-ns-ipv4.csv and auth-ns-ipv6.csv
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum concurrent domain resolutions (shared by all chunk files)
    #[arg(long, default_value_t = SEMAPHORE_LIMIT)]
    pub max_concurrency: usize,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Resolver backend: dig|hickory
    #[arg(long, value_enum, default_value_t = Backend::Dig)]
    pub backend: Backend,

    /// Path to the dig binary
    #[arg(long, value_parser, default_value = DEFAULT_DIG_PATH)]
    pub dig_path: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Seconds between progress log lines
    #[arg(long, default_value_t = LOGGING_INTERVAL)]
    pub progress_interval: u64,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            input_dir: opt.input_dir,
            file_pattern: opt.pattern,
            output_dir: opt.output_dir,
            max_concurrency: opt.max_concurrency,
            query_timeout_secs: opt.timeout_seconds,
            backend: opt.backend,
            dig_path: opt.dig_path,
            log_level: opt.log_level,
            log_format: opt.log_format,
            progress_interval_secs: opt.progress_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from("chunk-data"));
        assert_eq!(config.file_pattern, "chunk_*.csv");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.max_concurrency, 50);
        assert_eq!(config.query_timeout(), Duration::from_secs(10));
        assert_eq!(config.backend, Backend::Dig);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_concurrency() {
        let config = Config {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InitializationError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let config = Config {
            query_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_opt_defaults_map_onto_config() {
        let opt = Opt::parse_from(["ns_harvest"]);
        let config = Config::from(opt);
        assert_eq!(config.input_dir, PathBuf::from("chunk-data"));
        assert_eq!(config.max_concurrency, SEMAPHORE_LIMIT);
        assert_eq!(config.query_timeout_secs, DNS_TIMEOUT_SECS);
    }

    #[test]
    fn test_opt_parses_overrides() {
        let opt = Opt::parse_from([
            "ns_harvest",
            "--dir",
            "/data/chunks",
            "--max-concurrency",
            "7",
            "--timeout-seconds",
            "2",
            "--backend",
            "hickory",
            "--log-format",
            "json",
        ]);
        let config = Config::from(opt);
        assert_eq!(config.input_dir, PathBuf::from("/data/chunks"));
        assert_eq!(config.max_concurrency, 7);
        assert_eq!(config.query_timeout_secs, 2);
        assert_eq!(config.backend, Backend::Hickory);
        assert!(matches!(config.log_format, LogFormat::Json));
    }
}
