//! Nameserver address resolution (A/AAAA short-form queries).

use log::warn;

use crate::context::ResolutionContext;
use crate::error_handling::{ErrorType, InfoType};
use crate::models::NameserverAddresses;
use crate::resolver::AddressFamily;

/// Resolves the IPv4 and IPv6 addresses of `nameserver`.
///
/// The A query runs first, then the AAAA query. A failed query leaves that
/// family's list empty. A successful query with no answer lines yields a
/// single empty-string placeholder.
pub async fn resolve_addresses(nameserver: &str, ctx: &ResolutionContext) -> NameserverAddresses {
    NameserverAddresses {
        ipv4: resolve_family(nameserver, AddressFamily::V4, ctx).await,
        ipv6: resolve_family(nameserver, AddressFamily::V6, ctx).await,
    }
}

async fn resolve_family(
    nameserver: &str,
    family: AddressFamily,
    ctx: &ResolutionContext,
) -> Vec<String> {
    let error_type = match family {
        AddressFamily::V4 => ErrorType::AQueryError,
        AddressFamily::V6 => ErrorType::AaaaQueryError,
    };

    match ctx
        .query(error_type, ctx.resolver.query_addresses(nameserver, family))
        .await
    {
        Ok(output) => {
            let addresses = parse_short_output(&output);
            if addresses.is_empty() {
                ctx.stats.increment_info(InfoType::EmptyAddressAnswer);
                vec![String::new()]
            } else {
                addresses
            }
        }
        Err(e) => {
            warn!(
                "Failed to query {} records for NS {nameserver}: {e}",
                family.record_type()
            );
            Vec::new()
        }
    }
}

/// One address per non-blank line, trimmed.
pub fn parse_short_output(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
