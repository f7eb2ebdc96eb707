// Meraki Dashboard API client.
//
// Meraki authenticates every request with a static API key header, so there
// is no session to establish. Scopes are the organization's appliance
// networks, or an explicit list of network ids.

use fwaudit_core::{Action, NatPolicy, Rule, VpnConfig};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use super::{
    get_json, split_ports, AuthError, ConfigFetcher, FetchError, Scope, TransportConfig, Vendor,
};

pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";
/// `X-Cisco-Meraki-API-Key`, lowercased as header names are stored.
pub const API_KEY_HEADER: &str = "x-cisco-meraki-api-key";

/// Which networks a [`MerakiClient`] audits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkSelection {
    /// Every appliance network in the organization.
    Organization(String),
    /// Exactly these network ids.
    Networks(Vec<String>),
}

pub struct MerakiClient {
    http: Client,
    base_url: String,
    selection: NetworkSelection,
}

impl MerakiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        selection: NetworkSelection,
        transport: &TransportConfig,
    ) -> Result<Self, AuthError> {
        let mut key = HeaderValue::from_str(api_key.trim()).map_err(|_| {
            AuthError::InvalidCredentials("API key is not a valid header value".into())
        })?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        let http = transport.build_client(headers).map_err(AuthError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            selection,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        get_json(self.http.get(&url), &url)
    }
}

impl ConfigFetcher for MerakiClient {
    fn vendor(&self) -> Vendor {
        Vendor::Meraki
    }

    fn authenticate(&mut self) -> Result<(), AuthError> {
        // The API key header is attached to every request.
        Ok(())
    }

    fn list_scopes(&self) -> Result<Vec<Scope>, FetchError> {
        let org_id = match &self.selection {
            NetworkSelection::Networks(ids) => {
                return Ok(ids.iter().map(|id| Scope::new(id, id)).collect());
            }
            NetworkSelection::Organization(org_id) => org_id,
        };

        let networks: Vec<NetworkEntry> = self.get(&format!("organizations/{org_id}/networks"))?;
        Ok(networks
            .into_iter()
            .filter(|n| {
                let has_appliance = n.has_appliance();
                if !has_appliance {
                    debug!("skipping network {} without an appliance", n.id);
                }
                has_appliance
            })
            .map(|n| {
                let name = if n.name.trim().is_empty() {
                    n.id.clone()
                } else {
                    n.name
                };
                Scope::new(n.id, name)
            })
            .collect())
    }

    fn fetch_rules(&self, scope: &Scope) -> Result<Vec<Rule>, FetchError> {
        let envelope: RulesEnvelope<L3Rule> = self.get(&format!(
            "networks/{}/appliance/firewall/l3FirewallRules",
            scope.id
        ))?;
        Ok(envelope
            .rules
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| raw.into_rule(idx + 1))
            .collect())
    }

    fn fetch_nat_policies(&self, scope: &Scope) -> Result<Vec<NatPolicy>, FetchError> {
        let envelope: RulesEnvelope<OneToOneNatRule> = self.get(&format!(
            "networks/{}/appliance/firewall/oneToOneNatRules",
            scope.id
        ))?;
        Ok(envelope
            .rules
            .into_iter()
            .map(|raw| NatPolicy {
                name: raw.name.unwrap_or_default(),
                original_destination: raw.public_ip.unwrap_or_default(),
                translated_destination: raw.lan_ip.unwrap_or_default(),
                enabled: true,
            })
            .collect())
    }

    fn fetch_vpn_config(&self, scope: &Scope) -> Result<Option<VpnConfig>, FetchError> {
        let vpn: SiteToSiteVpn = self.get(&format!(
            "networks/{}/appliance/vpn/siteToSiteVpn",
            scope.id
        ))?;
        let mode = vpn.mode.unwrap_or_default();
        if mode.is_empty() || mode.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        Ok(Some(VpnConfig {
            name: scope.name.clone(),
            mode,
            peers: vpn.hubs.len(),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct NetworkEntry {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "productTypes")]
    product_types: Option<Vec<String>>,
}

impl NetworkEntry {
    /// Networks that do not report product types are assumed to have one.
    fn has_appliance(&self) -> bool {
        self.product_types
            .as_ref()
            .map_or(true, |types| types.iter().any(|t| t == "appliance"))
    }
}

#[derive(Debug, Deserialize)]
struct RulesEnvelope<T> {
    #[serde(default = "Vec::new")]
    rules: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct L3Rule {
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    policy: Option<String>,
    #[serde(default)]
    src_cidr: Option<String>,
    #[serde(default)]
    dest_port: Option<String>,
}

impl L3Rule {
    fn into_rule(self, position: usize) -> Rule {
        Rule {
            position,
            name: String::new(),
            comment: self.comment.unwrap_or_default(),
            source: self.src_cidr.unwrap_or_default().trim().to_string(),
            ports: split_ports(self.dest_port.as_deref().unwrap_or("")),
            zones: None,
            enabled: true,
            action: Action::from_keyword(self.policy.as_deref().unwrap_or("")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OneToOneNatRule {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    public_ip: Option<String>,
    #[serde(default)]
    lan_ip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SiteToSiteVpn {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    hubs: Vec<serde_json::Value>,
}
