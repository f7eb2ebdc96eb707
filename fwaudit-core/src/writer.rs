use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while writing a rendered report.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The directory meant to hold the report is missing.
    #[error("output directory {0} does not exist")]
    MissingDirectory(PathBuf),
    /// Failed to write the report file.
    #[error("failed to write report file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a rendered report to `path`. The parent directory must already exist.
pub fn write_report(path: &Path, contents: &str) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(WriteError::MissingDirectory(parent.to_path_buf()));
        }
    }
    fs::write(path, contents).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
