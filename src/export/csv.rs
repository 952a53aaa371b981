//! CSV export of the result tables.
//!
//! Each table is staged in a temporary file inside the output directory and
//! renamed into place only once fully written, so a failed write never
//! leaves a partial output file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::{info, warn};
use tempfile::NamedTempFile;

use crate::config::{IPV4_OUTPUT_FILE, IPV6_OUTPUT_FILE, OUTPUT_HEADER};
use crate::error_handling::OutputError;
use crate::models::DomainRecord;

/// Paths of the two written tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub ipv4: PathBuf,
    pub ipv6: PathBuf,
}

/// Writes `auth-ns-ipv4.csv` and `auth-ns-ipv6.csv` into `output_dir`,
/// creating the directory if needed.
///
/// # Errors
///
/// Returns an `OutputError` if the directory cannot be created or either
/// table cannot be written. Failures are fatal to the run.
pub fn write_results(
    output_dir: &Path,
    ipv4: &[DomainRecord],
    ipv6: &[DomainRecord],
) -> Result<OutputPaths, OutputError> {
    std::fs::create_dir_all(output_dir).map_err(|source| OutputError::Directory {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let paths = OutputPaths {
        ipv4: output_dir.join(IPV4_OUTPUT_FILE),
        ipv6: output_dir.join(IPV6_OUTPUT_FILE),
    };

    // Both tables are staged before either is moved into place
    info!("Writing {} IPv4 results to file", ipv4.len());
    let staged_ipv4 = stage_table(&paths.ipv4, ipv4)?;
    info!("Writing {} IPv6 results to file", ipv6.len());
    let staged_ipv6 = stage_table(&paths.ipv6, ipv6)?;

    persist_table(staged_ipv4, &paths.ipv4)?;
    if let Err(e) = persist_table(staged_ipv6, &paths.ipv6) {
        // Never leave the IPv4 table without its IPv6 counterpart
        if let Err(remove_error) = std::fs::remove_file(&paths.ipv4) {
            warn!(
                "Failed to remove {} after failed write: {remove_error}",
                paths.ipv4.display()
            );
        }
        return Err(e);
    }

    info!(
        "Finished writing results to {} and {}",
        paths.ipv4.display(),
        paths.ipv6.display()
    );
    Ok(paths)
}

/// Writes one table with a `domain,NS,IP` header.
pub fn write_table(path: &Path, records: &[DomainRecord]) -> Result<(), OutputError> {
    let staged = stage_table(path, records)?;
    persist_table(staged, path)
}

/// Writes a complete table into a temporary file next to `path`.
///
/// The temporary file is deleted if it is dropped without being persisted.
fn stage_table(path: &Path, records: &[DomainRecord]) -> Result<NamedTempFile, OutputError> {
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let staged = NamedTempFile::new_in(dir).map_err(io_error)?;

    // Header is written explicitly so empty tables still carry it
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(staged);
    writer.write_record(OUTPUT_HEADER).map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }

    let mut staged = writer
        .into_inner()
        .map_err(|e| io_error(std::io::Error::other(e.to_string())))?;
    staged.flush().map_err(io_error)?;
    Ok(staged)
}

fn persist_table(staged: NamedTempFile, path: &Path) -> Result<(), OutputError> {
    staged.persist(path).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
