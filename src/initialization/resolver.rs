//! DNS resolver backend initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::info;

use crate::config::{Backend, Config, DNS_ATTEMPTS};
use crate::error_handling::InitializationError;
use crate::resolver::{DigResolver, HickoryResolver, Resolver};

/// Builds the Resolver backend selected by `config.backend`.
///
/// The hickory backend uses the default upstream configuration with the
/// configured per-query timeout. The outer per-query timeout still applies
/// on top of it.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the dig binary path is empty.
pub fn init_resolver(config: &Config) -> Result<Arc<dyn Resolver>, InitializationError> {
    match config.backend {
        Backend::Dig => {
            if config.dig_path.as_os_str().is_empty() {
                return Err(InitializationError::DnsResolverError(
                    "dig path is empty".into(),
                ));
            }
            info!("Using dig backend ({})", config.dig_path.display());
            Ok(Arc::new(DigResolver::new(config.dig_path.clone())))
        }
        Backend::Hickory => {
            let mut opts = ResolverOpts::default();
            opts.timeout = Duration::from_secs(config.query_timeout_secs);
            opts.attempts = DNS_ATTEMPTS;
            // No search domain appending: names are queried as given
            opts.ndots = 0;

            info!("Using hickory-resolver backend");
            let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);
            Ok(Arc::new(HickoryResolver::new(Arc::new(resolver))))
        }
    }
}
