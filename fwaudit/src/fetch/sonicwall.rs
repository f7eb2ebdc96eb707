// SonicOS API client.
//
// SonicWALL exchanges HTTP Basic credentials for a bearer token once per run.
// The device itself is the only scope. Rules are zone-aware: every access
// rule carries a from/to zone pair.

use fwaudit_core::{Action, NatPolicy, Rule, VpnConfig, ZonePair};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{
    get_json, split_ports, AuthError, ConfigFetcher, FetchError, Scope, SessionToken,
    TransportConfig, Vendor,
};

pub const AUTH_PATH: &str = "api/sonicos/auth";
pub const ACCESS_RULES_PATH: &str = "api/sonicos/access-rules/ipv4";
pub const NAT_POLICIES_PATH: &str = "api/sonicos/nat-policies/ipv4";
pub const VPN_POLICIES_PATH: &str = "api/sonicos/vpn/policies/ipv4";

pub struct SonicWallClient {
    http: Client,
    base_url: String,
    host: String,
    username: String,
    password: String,
    token: Option<SessionToken>,
}

impl SonicWallClient {
    /// `base_url` is the management root, for example `https://192.0.2.1`.
    pub fn new(
        base_url: &str,
        username: &str,
        password: &str,
        transport: &TransportConfig,
    ) -> Result<Self, AuthError> {
        let http = transport
            .build_client(HeaderMap::new())
            .map_err(AuthError::Client)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let host = base_url
            .split_once("://")
            .map_or(base_url.as_str(), |(_, rest)| rest)
            .to_string();
        Ok(Self {
            http,
            base_url,
            host,
            username: username.to_string(),
            password: password.to_string(),
            token: None,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Exchange the Basic credentials for a session token.
    ///
    /// One attempt only. A refusal is [`AuthError::Rejected`]; a transport
    /// failure is [`AuthError::Unreachable`].
    pub fn login(&self) -> Result<SessionToken, AuthError> {
        let url = self.url(AUTH_PATH);
        debug!("POST {url}");
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|source| AuthError::Unreachable {
                host: self.host.clone(),
                source,
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(self.rejected(format!("credentials refused (HTTP {})", status.as_u16())));
        }
        if !status.is_success() {
            return Err(self.rejected(format!("unexpected HTTP {}", status.as_u16())));
        }

        let body: AuthResponse = resp
            .json()
            .map_err(|e| self.rejected(format!("unreadable auth response: {e}")))?;
        match body.token {
            Some(token) if !token.trim().is_empty() => Ok(SessionToken::new(token.trim())),
            _ => Err(self.rejected("no session token in auth response".to_string())),
        }
    }

    fn rejected(&self, reason: String) -> AuthError {
        AuthError::Rejected {
            host: self.host.clone(),
            reason,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let token = self.token.as_ref().ok_or(FetchError::NotAuthenticated)?;
        let url = self.url(path);
        get_json(self.http.get(&url).bearer_auth(token.as_str()), &url)
    }
}

impl ConfigFetcher for SonicWallClient {
    fn vendor(&self) -> Vendor {
        Vendor::SonicWall
    }

    fn authenticate(&mut self) -> Result<(), AuthError> {
        self.token = Some(self.login()?);
        Ok(())
    }

    fn list_scopes(&self) -> Result<Vec<Scope>, FetchError> {
        Ok(vec![Scope::new(self.host.as_str(), self.host.as_str())])
    }

    fn fetch_rules(&self, _scope: &Scope) -> Result<Vec<Rule>, FetchError> {
        let envelope: AccessRulesEnvelope = self.get(ACCESS_RULES_PATH)?;
        Ok(envelope
            .access_rules
            .into_iter()
            .filter_map(|entry| entry.ipv4)
            .enumerate()
            .map(|(idx, raw)| raw.into_rule(idx + 1))
            .collect())
    }

    fn fetch_nat_policies(&self, _scope: &Scope) -> Result<Vec<NatPolicy>, FetchError> {
        let envelope: NatPoliciesEnvelope = self.get(NAT_POLICIES_PATH)?;
        Ok(envelope
            .nat_policies
            .into_iter()
            .filter_map(|entry| entry.ipv4)
            .map(|raw| NatPolicy {
                name: raw.name.unwrap_or_default(),
                original_destination: raw
                    .original_destination
                    .map(AddressRef::describe)
                    .unwrap_or_default(),
                translated_destination: raw
                    .translated_destination
                    .map(AddressRef::describe)
                    .unwrap_or_default(),
                enabled: raw.enable.unwrap_or(true),
            })
            .collect())
    }

    fn fetch_vpn_config(&self, scope: &Scope) -> Result<Option<VpnConfig>, FetchError> {
        let envelope: VpnEnvelope = self.get(VPN_POLICIES_PATH)?;
        let policies = envelope.vpn.policy;
        if policies.is_empty() {
            return Ok(None);
        }
        Ok(Some(VpnConfig {
            name: scope.name.clone(),
            mode: "site-to-site".to_string(),
            peers: policies.len(),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessRulesEnvelope {
    #[serde(default)]
    access_rules: Vec<Ipv4Entry<AccessRule>>,
}

#[derive(Debug, Deserialize)]
struct NatPoliciesEnvelope {
    #[serde(default)]
    nat_policies: Vec<Ipv4Entry<NatPolicyEntry>>,
}

#[derive(Debug, Deserialize)]
struct Ipv4Entry<T> {
    #[serde(default = "Option::default")]
    ipv4: Option<T>,
}

#[derive(Debug, Deserialize)]
struct AccessRule {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    enable: Option<bool>,
    #[serde(default)]
    source: Option<Endpoint>,
    #[serde(default)]
    service: Option<Service>,
}

impl AccessRule {
    fn into_rule(self, position: usize) -> Rule {
        let zones = match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some(ZonePair::new(
                from.unwrap_or_default(),
                to.unwrap_or_default(),
            )),
        };
        Rule {
            position,
            name: self.name.unwrap_or_default(),
            comment: self.comment.unwrap_or_default(),
            source: self
                .source
                .and_then(|s| s.address)
                .map(AddressRef::describe)
                .unwrap_or_default(),
            ports: self.service.map(Service::ports).unwrap_or_default(),
            zones,
            enabled: self.enable.unwrap_or(true),
            action: Action::from_keyword(self.action.as_deref().unwrap_or("")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Endpoint {
    #[serde(default)]
    address: Option<AddressRef>,
}

#[derive(Debug, Deserialize)]
struct AddressRef {
    #[serde(default)]
    any: Option<bool>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    group: Option<String>,
}

impl AddressRef {
    fn describe(self) -> String {
        if self.any.unwrap_or(false) {
            return "any".to_string();
        }
        self.name.or(self.group).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Service {
    #[serde(default)]
    any: Option<bool>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ports: Option<Vec<String>>,
}

impl Service {
    /// Explicit port list first, then a comma-separated service name. `any` has no ports.
    fn ports(self) -> Vec<String> {
        if self.any.unwrap_or(false) {
            return Vec::new();
        }
        if let Some(ports) = self.ports {
            return ports
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
        self.name.as_deref().map(split_ports).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct NatPolicyEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    enable: Option<bool>,
    #[serde(default)]
    original_destination: Option<AddressRef>,
    #[serde(default)]
    translated_destination: Option<AddressRef>,
}

#[derive(Debug, Default, Deserialize)]
struct VpnEnvelope {
    #[serde(default)]
    vpn: VpnPolicies,
}

#[derive(Debug, Default, Deserialize)]
struct VpnPolicies {
    #[serde(default)]
    policy: Vec<serde_json::Value>,
}
