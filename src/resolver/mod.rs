//! Resolver backends.
//!
//! A [`Resolver`] answers one query type for one name and hands back the raw
//! answer text. All record parsing lives in [`crate::dns`], so any backend
//! (the `dig` binary, a library client, a test double) is interchangeable:
//!
//! - NS queries return dig-style presentation text, with additional-section
//!   records after a `;; ADDITIONAL SECTION:` marker line.
//! - A/AAAA queries return short-form text, one address literal per line.

mod dig;
mod hickory;

use std::fmt;

use async_trait::async_trait;

use crate::error_handling::ResolverError;

pub use dig::DigResolver;
pub use hickory::HickoryResolver;

/// Address family of an address query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// A records
    V4,
    /// AAAA records
    V6,
}

impl AddressFamily {
    /// DNS record type queried for this family.
    pub fn record_type(&self) -> &'static str {
        match self {
            AddressFamily::V4 => "A",
            AddressFamily::V6 => "AAAA",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// Answers a single DNS query type for a single name.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// NS query with additional-section data requested.
    async fn query_ns(&self, name: &str) -> Result<String, ResolverError>;

    /// Short-form A or AAAA query.
    async fn query_addresses(
        &self,
        name: &str,
        family: AddressFamily,
    ) -> Result<String, ResolverError>;
}
