//! Chunk file discovery and domain list reading.

use std::path::{Path, PathBuf};

use log::warn;
use regex::Regex;

use crate::error_handling::InputError;

/// Lists the regular files in `dir` whose names match `pattern`, sorted.
///
/// `pattern` is a file-name glob supporting `*` (any run of characters) and
/// `?` (one character); everything else matches literally.
///
/// # Errors
///
/// Returns `InputError::Directory` if `dir` cannot be read and
/// `InputError::Pattern` if the pattern cannot be compiled.
pub fn discover_chunk_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, InputError> {
    let matcher = glob_to_regex(pattern)?;
    let entries = std::fs::read_dir(dir).map_err(|source| InputError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {e}", dir.display());
                continue;
            }
        };
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let name = entry.file_name();
        if is_file && name.to_str().is_some_and(|name| matcher.is_match(name)) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn glob_to_regex(pattern: &str) -> Result<Regex, InputError> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for c in pattern.chars() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            c => expr.push_str(&regex::escape(&c.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|source| InputError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Reads the domains in a chunk file.
///
/// The file is a CSV table with a header row; the first column of every
/// following row is a domain. Cells are trimmed and empty cells skipped.
///
/// # Errors
///
/// Returns `InputError::Csv` if the file cannot be opened or is malformed.
pub fn read_domains(path: &Path) -> Result<Vec<String>, InputError> {
    let csv_error = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut domains = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if let Some(domain) = record.get(0).map(str::trim).filter(|d| !d.is_empty()) {
            domains.push(domain.to_string());
        }
    }
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_to_regex() {
        let re = glob_to_regex("chunk_*.csv").unwrap();
        assert!(re.is_match("chunk_0001.csv"));
        assert!(re.is_match("chunk_.csv"));
        assert!(!re.is_match("chunk_0001.csv.bak"));
        assert!(!re.is_match("chunkX0001.csv"));
        assert!(!re.is_match("other_0001.csv"));

        let re = glob_to_regex("part-?.txt").unwrap();
        assert!(re.is_match("part-1.txt"));
        assert!(!re.is_match("part-12.txt"));
    }

    #[test]
    fn test_discover_chunk_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("chunk_2.csv"), "domain\n").unwrap();
        fs::write(dir.path().join("chunk_1.csv"), "domain\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("chunk_dir.csv")).unwrap();

        let files = discover_chunk_files(dir.path(), "chunk_*.csv").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["chunk_1.csv", "chunk_2.csv"]);
    }

    #[test]
    fn test_discover_chunk_files_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(matches!(
            discover_chunk_files(&missing, "chunk_*.csv"),
            Err(InputError::Directory { .. })
        ));
    }

    #[test]
    fn test_read_domains_skips_header_and_uses_first_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunk_1.csv");
        fs::write(
            &path,
            "domain,rank\nexample.com,1\n  example.org ,2\n,3\nexample.net\n",
        )
        .unwrap();

        let domains = read_domains(&path).unwrap();
        assert_eq!(domains, vec!["example.com", "example.org", "example.net"]);
    }

    #[test]
    fn test_read_domains_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunk_1.csv");
        fs::write(&path, "domain\n").unwrap();
        assert!(read_domains(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_domains_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_domains(&dir.path().join("chunk_404.csv"));
        assert!(matches!(result, Err(InputError::Csv { .. })));
    }

    #[test]
    fn test_read_domains_malformed_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunk_1.csv");
        // Unterminated quote spanning invalid UTF-8
        fs::write(&path, b"domain\n\"example.com\xff\n".as_slice()).unwrap();
        assert!(read_domains(&path).is_err());
    }
}
