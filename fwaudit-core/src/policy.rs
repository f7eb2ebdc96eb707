//! Audit policy constants.
//!
//! The analyzer never hard-codes the ports or tokens it checks for; it reads
//! them from an [`AuditPolicy`]. The built-in policy matches the thresholds the
//! auditors have always used. Operators may load a TOML override, and any key
//! missing from that file keeps its built-in value. Severities are not part of
//! the policy; see [`crate::IssueKind::severity`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Destination ports associated with common attack surfaces
/// (FTP, Telnet, SMB, MSSQL, RDP, VNC).
pub const DEFAULT_HIGH_RISK_PORTS: [u16; 6] = [21, 23, 445, 1433, 3389, 5900];

/// Source specifier meaning "no restriction".
pub const DEFAULT_UNRESTRICTED_SOURCE: &str = "any";

/// Zone name treated as the untrusted internet side on zone-aware devices.
pub const DEFAULT_WAN_ZONE: &str = "WAN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditPolicy {
    #[serde(default = "default_high_risk_ports")]
    pub high_risk_ports: Vec<u16>,
    #[serde(default = "default_unrestricted_source")]
    pub unrestricted_source: String,
    #[serde(default = "default_wan_zone")]
    pub wan_zone: String,
}

impl Default for AuditPolicy {
    fn default() -> Self {
        Self {
            high_risk_ports: default_high_risk_ports(),
            unrestricted_source: default_unrestricted_source(),
            wan_zone: default_wan_zone(),
        }
    }
}

impl AuditPolicy {
    /// Return the high-risk port a token names, if any. Tokens are compared
    /// as single port numbers; ranges are not expanded.
    pub fn high_risk_port(&self, token: &str) -> Option<u16> {
        let port = token.trim().parse::<u16>().ok()?;
        self.high_risk_ports.contains(&port).then_some(port)
    }

    pub fn is_unrestricted_source(&self, source: &str) -> bool {
        source.trim().eq_ignore_ascii_case(&self.unrestricted_source)
    }

    pub fn is_wan_zone(&self, zone: &str) -> bool {
        zone.trim().eq_ignore_ascii_case(&self.wan_zone)
    }
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse policy file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load the policy from `path`, or the built-in policy when no path is given.
///
/// Returns the policy and a description of where it came from
/// (`builtin` or `file:<path>`).
pub fn load_policy_with_source(
    path: Option<&Path>,
) -> Result<(AuditPolicy, String), PolicyError> {
    let Some(path) = path else {
        return Ok((AuditPolicy::default(), "builtin".to_string()));
    };
    let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let policy = parse_policy(&raw).map_err(|source| PolicyError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((policy, format!("file:{}", path.display())))
}

pub fn parse_policy(raw: &str) -> Result<AuditPolicy, toml::de::Error> {
    toml::from_str::<AuditPolicy>(raw)
}

fn default_high_risk_ports() -> Vec<u16> {
    DEFAULT_HIGH_RISK_PORTS.to_vec()
}

fn default_unrestricted_source() -> String {
    DEFAULT_UNRESTRICTED_SOURCE.to_string()
}

fn default_wan_zone() -> String {
    DEFAULT_WAN_ZONE.to_string()
}
