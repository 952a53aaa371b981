//! Core record types shared by the resolution pipeline.

use std::collections::HashMap;

use serde::Serialize;

/// One observed association between a domain, one of its authoritative
/// nameservers, and one address of that nameserver.
///
/// `nameserver` and `ip` are empty when resolution yielded nothing for that
/// position. Records are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DomainRecord {
    pub domain: String,
    #[serde(rename = "NS")]
    pub nameserver: String,
    #[serde(rename = "IP")]
    pub ip: String,
}

impl DomainRecord {
    pub fn new(
        domain: impl Into<String>,
        nameserver: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            nameserver: nameserver.into(),
            ip: ip.into(),
        }
    }

    /// The row emitted for a domain with no discoverable nameservers.
    pub fn unresolved(domain: impl Into<String>) -> Self {
        Self::new(domain, "", "")
    }
}

/// Nameserver names discovered for one domain, each seeded with any addresses
/// the NS response carried inline in its additional section.
pub type NameserverSet = HashMap<String, Vec<String>>;

/// Rows produced for one address family by one file pipeline.
pub type ChunkBatch = Vec<DomainRecord>;

/// The IPv4 and IPv6 rows produced for a single domain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DomainRows {
    pub ipv4: Vec<DomainRecord>,
    pub ipv6: Vec<DomainRecord>,
}

impl DomainRows {
    /// One `(domain, "", "")` row per family.
    pub fn unresolved(domain: &str) -> Self {
        Self {
            ipv4: vec![DomainRecord::unresolved(domain)],
            ipv6: vec![DomainRecord::unresolved(domain)],
        }
    }
}

/// Addresses of a single nameserver, split by family.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameserverAddresses {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
}

/// All rows for one address family across the whole run.
pub type ResultTable = Vec<DomainRecord>;
