//! Per-domain resolution task.
//!
//! `process_domain()` discovers a domain's nameservers, resolves each
//! nameserver's addresses in turn, and flattens the result into rows. It never
//! fails: every error below it has already been absorbed as an empty result,
//! so each domain contributes at least one row per address family.

use log::debug;

use crate::context::ResolutionContext;
use crate::dns::{resolve_addresses, resolve_nameservers};
use crate::error_handling::InfoType;
use crate::models::{DomainRecord, DomainRows};

/// Resolves one domain into its IPv4 and IPv6 rows.
///
/// - No nameservers: exactly one `(domain, "", "")` row per family.
/// - A family with no addresses for a nameserver: one `(domain, ns, "")` row.
/// - Otherwise: one `(domain, ns, address)` row per address.
///
/// Nameservers are resolved sequentially; row order across nameservers is
/// unspecified.
pub async fn process_domain(domain: &str, ctx: &ResolutionContext) -> DomainRows {
    let nameservers = resolve_nameservers(domain, ctx).await;

    if nameservers.is_empty() {
        debug!("No nameservers found for domain {domain}");
        ctx.stats.increment_info(InfoType::NoNameservers);
        return DomainRows::unresolved(domain);
    }

    let mut rows = DomainRows::default();
    for ns in nameservers.keys() {
        let addresses = resolve_addresses(ns, ctx).await;
        rows.ipv4.extend(family_rows(domain, ns, addresses.ipv4));
        rows.ipv6.extend(family_rows(domain, ns, addresses.ipv6));
    }
    rows
}

fn family_rows(domain: &str, ns: &str, addresses: Vec<String>) -> Vec<DomainRecord> {
    if addresses.is_empty() {
        return vec![DomainRecord::new(domain, ns, "")];
    }
    addresses
        .into_iter()
        .map(|ip| DomainRecord::new(domain, ns, ip))
        .collect()
}
