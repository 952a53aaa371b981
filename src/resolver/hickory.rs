//! hickory-resolver backend.
//!
//! Renders library answers into the same presentation text `dig` produces,
//! so both backends share one parser.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::lookup::Lookup;
use hickory_resolver::proto::rr::{RData, Record, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::{AddressFamily, Resolver};
use crate::config::ADDITIONAL_SECTION_MARKER;
use crate::error_handling::ResolverError;

/// Resolves through an in-process `TokioAsyncResolver`.
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryResolver {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }

    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<Lookup>, ResolverError> {
        match self.resolver.lookup(name, record_type).await {
            Ok(lookup) => Ok(Some(lookup)),
            Err(e) if is_no_records(&e) => Ok(None),
            Err(e) => Err(ResolverError::Lookup(e.to_string())),
        }
    }
}

/// NXDomain and empty answers are successful queries with nothing in them.
fn is_no_records(error: &ResolveError) -> bool {
    matches!(error.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

fn presentation_line(record: &Record, data: &RData) -> String {
    format!(
        "{}\t{}\tIN\t{}\t{}",
        record.name(),
        record.ttl(),
        record.record_type(),
        data
    )
}

/// Renders NS answers followed by an additional section of A/AAAA records.
pub(crate) fn render_ns_answer(records: &[Record]) -> String {
    let mut answer = String::new();
    let mut additional = String::new();

    for record in records {
        let Some(data) = record.data() else {
            continue;
        };
        match data {
            RData::NS(_) => {
                let _ = writeln!(answer, "{}", presentation_line(record, data));
            }
            RData::A(_) | RData::AAAA(_) => {
                let _ = writeln!(additional, "{}", presentation_line(record, data));
            }
            _ => {}
        }
    }

    if !additional.is_empty() {
        let _ = writeln!(answer, "\n{ADDITIONAL_SECTION_MARKER}");
        answer.push_str(&additional);
    }
    answer
}

/// Renders address records the way `dig +short` prints them.
pub(crate) fn render_short_answer(records: &[Record], family: AddressFamily) -> String {
    let mut output = String::new();
    for data in records.iter().filter_map(Record::data) {
        match (family, data) {
            (AddressFamily::V4, RData::A(a)) => {
                let _ = writeln!(output, "{a}");
            }
            (AddressFamily::V6, RData::AAAA(aaaa)) => {
                let _ = writeln!(output, "{aaaa}");
            }
            _ => {}
        }
    }
    output
}

#[async_trait]
impl Resolver for HickoryResolver {
    async fn query_ns(&self, name: &str) -> Result<String, ResolverError> {
        Ok(self
            .lookup(name, RecordType::NS)
            .await?
            .map(|lookup| render_ns_answer(lookup.records()))
            .unwrap_or_default())
    }

    async fn query_addresses(
        &self,
        name: &str,
        family: AddressFamily,
    ) -> Result<String, ResolverError> {
        let record_type = match family {
            AddressFamily::V4 => RecordType::A,
            AddressFamily::V6 => RecordType::AAAA,
        };
        Ok(self
            .lookup(name, record_type)
            .await?
            .map(|lookup| render_short_answer(lookup.records(), family))
            .unwrap_or_default())
    }
}
