//! Nameserver discovery (NS records plus inline additional-section addresses).

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::config::{ADDITIONAL_SECTION_MARKER, DIG_BANNER_MARKER};
use crate::context::ResolutionContext;
use crate::error_handling::{ErrorType, InfoType};
use crate::models::NameserverSet;

const NS_RECORD_PATTERN: &str = r"\S+\s+IN\s+NS\s+(\S+)";

static NS_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(NS_RECORD_PATTERN).expect("Failed to compile NS record regex - this is a bug")
});

/// Returns the authoritative nameservers of `domain`.
///
/// Issues one NS query with additional data requested. A failed or timed-out
/// query is logged and yields an empty set; it never propagates.
pub async fn resolve_nameservers(domain: &str, ctx: &ResolutionContext) -> NameserverSet {
    let output = match ctx
        .query(ErrorType::NsQueryError, ctx.resolver.query_ns(domain))
        .await
    {
        Ok(output) => output,
        Err(e) => {
            warn!("Failed to query NS records for domain {domain}: {e}");
            return NameserverSet::new();
        }
    };

    let nameservers = parse_ns_output(&output);
    if nameservers.values().any(|addresses| !addresses.is_empty()) {
        ctx.stats.increment_info(InfoType::InlineAddresses);
    }
    for (ns, addresses) in &nameservers {
        if !addresses.is_empty() {
            debug!("Found inline addresses {addresses:?} for NS {ns} of domain {domain}");
        }
    }
    nameservers
}

/// Parses NS query output in presentation format.
///
/// Every line matching `<owner> IN NS <target>` seeds `<target>` with an empty
/// address list, except dig's version banner. Once the additional-section
/// marker has been seen, A/AAAA lines whose owner is an already-seeded
/// nameserver contribute their 5th field as an address.
pub fn parse_ns_output(output: &str) -> NameserverSet {
    let mut nameservers = NameserverSet::new();
    let mut in_additional = false;

    for line in output.lines() {
        if line.contains(ADDITIONAL_SECTION_MARKER) {
            in_additional = true;
        }

        if !line.contains(DIG_BANNER_MARKER) {
            if let Some(captures) = NS_RECORD.captures(line) {
                nameservers.entry(captures[1].to_string()).or_default();
            }
        }

        if in_additional {
            if let Some((owner, address)) = parse_address_line(line) {
                if let Some(addresses) = nameservers.get_mut(owner) {
                    addresses.push(address.to_string());
                }
            }
        }
    }

    nameservers
}

/// Splits an A/AAAA presentation line into (owner, address).
///
/// Positional: the owner is field 1 and the address is field 5.
fn parse_address_line(line: &str) -> Option<(&str, &str)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 || !fields[2].eq_ignore_ascii_case("IN") {
        return None;
    }
    match fields[3] {
        "A" | "AAAA" => Some((fields[0], fields[4])),
        _ => None,
    }
}
