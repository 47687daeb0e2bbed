//! Input file discovery.
//!
//! Expands literal paths and glob patterns (e.g. `lineitem.tbl.*` from a
//! split dbgen run) into the list of files to load.

use crate::error::{ImportError, Result};
use std::path::PathBuf;
use tracing::debug;

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand inputs into a sorted, de-duplicated list of files.
///
/// A literal path must exist; a glob must match at least one file.
pub fn expand_inputs<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        if !is_glob(pattern) {
            let path = PathBuf::from(pattern);
            if !path.is_file() {
                return Err(ImportError::SourceUnavailable {
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "no such file",
                    ),
                    path,
                });
            }
            files.push(path);
            continue;
        }

        let before = files.len();
        for entry in glob::glob(pattern)? {
            let path = entry.map_err(|e| ImportError::Io(e.into_error()))?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.len() == before {
            return Err(ImportError::NoInputFiles {
                pattern: pattern.to_string(),
            });
        }
        debug!("Pattern {} matched {} files", pattern, files.len() - before);
    }

    files.sort();
    files.dedup();
    Ok(files)
}
