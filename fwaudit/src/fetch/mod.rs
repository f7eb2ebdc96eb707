//! Vendor API access.
//!
//! Every vendor client implements [`ConfigFetcher`]. Clients only differ in how
//! they authenticate (API key header or bearer session token) and in the wire
//! shapes they decode; both hand back the same [`fwaudit_core`] records.
//!
//! Each call attempts its request exactly once. Clients report failures as
//! [`FetchError`]; deciding whether a failure is fatal is left to the caller
//! (see [`crate::audit`]).

pub mod meraki;
pub mod sonicwall;
pub mod transport;

use std::fmt::{self, Debug, Formatter};

use fwaudit_core::{NatPolicy, Rule, VpnConfig};
use log::debug;
use reqwest::blocking::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use meraki::MerakiClient;
pub use sonicwall::SonicWallClient;
pub use transport::TransportConfig;

/// Supported firewall vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Meraki,
    SonicWall,
}

impl Vendor {
    /// Name used in report titles and file names.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Meraki => "Meraki",
            Self::SonicWall => "SonicWall",
        }
    }

    /// Whether the vendor's rules are scoped by source/destination zone.
    pub fn zone_aware(self) -> bool {
        matches!(self, Self::SonicWall)
    }
}

/// One network or device to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub id: String,
    pub name: String,
}

impl Scope {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Bearer token returned by a session login. Held for one run, never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for SessionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Authentication failures. Fatal to the whole run.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The device answered and refused the credentials.
    #[error("authentication rejected by {host}: {reason}")]
    Rejected { host: String, reason: String },
    /// The auth endpoint could not be reached at all.
    #[error("authentication endpoint {host} unreachable")]
    Unreachable {
        host: String,
        #[source]
        source: reqwest::Error,
    },
    /// Credentials cannot be encoded into a request.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Failure to retrieve one collection for one scope.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no session token; authenticate before fetching")]
    NotAuthenticated,
}

/// Vendor capability used by an audit run.
pub trait ConfigFetcher {
    fn vendor(&self) -> Vendor;

    /// Establish whatever session the vendor needs. No-op for API-key vendors.
    fn authenticate(&mut self) -> Result<(), AuthError>;

    /// Networks or devices this client will audit.
    fn list_scopes(&self) -> Result<Vec<Scope>, FetchError>;

    fn fetch_rules(&self, scope: &Scope) -> Result<Vec<Rule>, FetchError>;

    fn fetch_nat_policies(&self, scope: &Scope) -> Result<Vec<NatPolicy>, FetchError>;

    fn fetch_vpn_config(&self, scope: &Scope) -> Result<Option<VpnConfig>, FetchError>;
}

/// Send a prepared GET and decode its JSON body.
pub(crate) fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
) -> Result<T, FetchError> {
    debug!("GET {url}");
    let resp = request.send().map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = resp.text().map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Split a comma-separated port specifier. `any` and blanks yield no tokens.
pub(crate) fn split_ports(list: &str) -> Vec<String> {
    if list.trim().eq_ignore_ascii_case("any") {
        return Vec::new();
    }
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{split_ports, SessionToken, Vendor};

    #[test]
    fn splits_port_lists() {
        assert_eq!(split_ports("80, 443,,8080"), vec!["80", "443", "8080"]);
        assert!(split_ports("Any").is_empty());
        assert!(split_ports("").is_empty());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret");
        assert!(!format!("{token:?}").contains("secret"));
        assert_eq!(token.as_str(), "secret");
    }

    #[test]
    fn vendor_names() {
        assert_eq!(Vendor::Meraki.display_name(), "Meraki");
        assert!(Vendor::SonicWall.zone_aware());
        assert!(!Vendor::Meraki.zone_aware());
        let v: Vendor = serde_json::from_str("\"sonicwall\"").expect("vendor");
        assert_eq!(v, Vendor::SonicWall);
    }
}
