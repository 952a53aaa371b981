//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ns_harvest` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ns_harvest::initialization::init_logger_with;
use ns_harvest::{run_resolution, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_resolution(config).await {
        Ok(report) => {
            println!(
                "Resolved {} domain{} from {} file{} in {:.1}s ({} IPv4 rows, {} IPv6 rows, {} errors)",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.files,
                if report.files == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.ipv4_records,
                report.ipv6_records,
                report.errors,
            );
            println!(
                "Results saved in {} and {}",
                report.output.ipv4.display(),
                report.output.ipv6.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("ns_harvest error: {:#}", e);
            process::exit(1);
        }
    }
}
