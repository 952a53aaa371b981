//! Error type definitions.
//!
//! This module defines the error types and statistic categories used throughout the application.

use std::path::PathBuf;
use std::time::Duration;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver backend.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Failure of a single Resolver invocation.
///
/// These are always recovered locally: the query is treated as having
/// returned no records.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The resolver process could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The resolver process ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The query did not complete within the per-query timeout.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// A library-based lookup failed.
    #[error("lookup failed: {0}")]
    Lookup(String),
}

/// Errors reading a chunk file or discovering the chunk file set.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input directory could not be listed.
    #[error("failed to read input directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file name pattern could not be compiled.
    #[error("invalid file pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The chunk file could not be opened or parsed as CSV.
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors writing the result tables. Fatal to the run.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing rows failed.
    #[error("failed to write CSV for {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Creating, flushing, or moving the staged output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Types of errors counted during a resolution run.
///
/// None of these abort the run; each is converted into the documented
/// empty-result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Resolver errors
    NsQueryError,
    AQueryError,
    AaaaQueryError,
    QueryTimeout,
    // Pipeline errors
    InputFileError,
    DomainTaskPanic,
    FilePipelinePanic,
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::NsQueryError => "NS query error",
            ErrorType::AQueryError => "A query error",
            ErrorType::AaaaQueryError => "AAAA query error",
            ErrorType::QueryTimeout => "DNS query timeout",
            ErrorType::InputFileError => "Unreadable input file",
            ErrorType::DomainTaskPanic => "Domain task panicked",
            ErrorType::FilePipelinePanic => "File pipeline panicked",
        }
    }
}

/// Types of informational metrics counted during a resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// A domain produced no nameservers.
    NoNameservers,
    /// An address query succeeded but returned no records.
    EmptyAddressAnswer,
    /// An NS response carried nameserver addresses inline.
    InlineAddresses,
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::NoNameservers => "Domains without nameservers",
            InfoType::EmptyAddressAnswer => "Empty address answers",
            InfoType::InlineAddresses => "Inline additional-section addresses",
        }
    }
}
