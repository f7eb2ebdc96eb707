//! JSON snapshots of fetched configuration.
//!
//! A snapshot is what a network run collected before analysis: the vendor and
//! its scope configs. Writing one with `--save-snapshot` and auditing it later
//! with `fwaudit offline` gives the same issues without touching the device.

use std::fs;
use std::path::{Path, PathBuf};

use fwaudit_core::ScopeConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audit::warn_invalid_ports;
use crate::fetch::Vendor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub vendor: Vendor,
    #[serde(default)]
    pub scopes: Vec<ScopeConfig>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write snapshot {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a snapshot and prepare its scopes for analysis.
///
/// Rules without a position are numbered in file order. Zone awareness is
/// taken from the vendor unless a scope already sets it.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut snapshot = parse_snapshot(&raw).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let zone_aware = snapshot.vendor.zone_aware();
    for scope in &mut snapshot.scopes {
        scope.zone_aware |= zone_aware;
        scope.number_rules();
        warn_invalid_ports(scope);
    }
    Ok(snapshot)
}

impl Snapshot {
    /// Audit the snapshot as `vendor`'s data, e.g. when the file names the wrong one.
    ///
    /// Zone awareness of every scope follows the new vendor, in both directions.
    pub fn set_vendor(&mut self, vendor: Vendor) {
        self.vendor = vendor;
        for scope in &mut self.scopes {
            scope.zone_aware = vendor.zone_aware();
        }
    }
}

pub fn parse_snapshot(raw: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(raw)
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let body = serde_json::to_string_pretty(snapshot).map_err(|source| SnapshotError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, body).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })
}
