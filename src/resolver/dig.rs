//! `dig` process backend.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{AddressFamily, Resolver};
use crate::error_handling::ResolverError;

/// Resolves by running the system `dig` binary, one process per query.
#[derive(Debug, Clone)]
pub struct DigResolver {
    program: PathBuf,
}

impl DigResolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String, ResolverError> {
        let program = self.program.display().to_string();
        // Killed when the caller's timeout drops the future.
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ResolverError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ResolverError::NonZeroExit {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for DigResolver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DIG_PATH)
    }
}

#[async_trait]
impl Resolver for DigResolver {
    async fn query_ns(&self, name: &str) -> Result<String, ResolverError> {
        self.run(&[name, "NS", "+additional"]).await
    }

    async fn query_addresses(
        &self,
        name: &str,
        family: AddressFamily,
    ) -> Result<String, ResolverError> {
        self.run(&[name, family.record_type(), "+short"]).await
    }
}
