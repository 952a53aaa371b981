//! DNS resolution of nameservers and their addresses.
//!
//! This module turns raw [`Resolver`](crate::resolver::Resolver) output into
//! structured results:
//! - Nameserver discovery (NS records, with inline additional-section addresses)
//! - Nameserver address resolution (A/AAAA records)
//!
//! Resolver failures are logged and counted here and never propagate.

mod addresses;
mod nameservers;

// Re-export public API
pub use addresses::{parse_short_output, resolve_addresses};
pub use nameservers::{parse_ns_output, resolve_nameservers};
