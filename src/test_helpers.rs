//! Test doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::context::ResolutionContext;
use crate::error_handling::{ProcessingStats, ResolverError};
use crate::resolver::{AddressFamily, Resolver};

/// Canned outcome of one scripted query.
#[derive(Debug, Clone)]
pub enum Scripted {
    Answer(String),
    Fail,
    Hang,
}

/// Resolver answering from fixed tables. Unscripted queries succeed with no output.
#[derive(Default)]
pub struct ScriptedResolver {
    ns: HashMap<String, Scripted>,
    addresses: HashMap<(String, AddressFamily), Scripted>,
    pub calls: AtomicUsize,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ns(mut self, name: &str, outcome: Scripted) -> Self {
        self.ns.insert(name.to_string(), outcome);
        self
    }

    pub fn addresses(mut self, name: &str, family: AddressFamily, outcome: Scripted) -> Self {
        self.addresses.insert((name.to_string(), family), outcome);
        self
    }

    async fn answer(&self, outcome: Option<&Scripted>) -> Result<String, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match outcome {
            None => Ok(String::new()),
            Some(Scripted::Answer(text)) => Ok(text.clone()),
            Some(Scripted::Fail) => Err(ResolverError::Lookup("scripted failure".into())),
            Some(Scripted::Hang) => std::future::pending().await,
        }
    }
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn query_ns(&self, name: &str) -> Result<String, ResolverError> {
        self.answer(self.ns.get(name)).await
    }

    async fn query_addresses(
        &self,
        name: &str,
        family: AddressFamily,
    ) -> Result<String, ResolverError> {
        self.answer(self.addresses.get(&(name.to_string(), family)))
            .await
    }
}

/// dig-style NS answer naming `nameservers` for `domain`, no additional section.
pub fn ns_answer(domain: &str, nameservers: &[&str]) -> String {
    nameservers
        .iter()
        .map(|ns| format!("{domain}.\t\t172800\tIN\tNS\t{ns}\n"))
        .collect()
}

pub fn context(resolver: ScriptedResolver) -> ResolutionContext {
    ResolutionContext::new(
        Arc::new(resolver),
        Duration::from_millis(200),
        Arc::new(ProcessingStats::new()),
    )
}
