//! Export of the resolved result tables.
//!
//! Writes the IPv4 and IPv6 tables as CSV with a `domain,NS,IP` header.

mod csv;

pub use self::csv::{write_results, write_table, OutputPaths};
