use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

/// What a rule does with matching traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Allow,
    Deny,
}

impl Action {
    /// Map a vendor action keyword. Only explicit allow keywords are treated as allow.
    pub fn from_keyword(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" | "accept" | "pass" | "permit" => Self::Allow,
            _ => Self::Deny,
        }
    }
}

/// Source and destination zone of a rule on zone-aware devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZonePair {
    pub source: String,
    pub destination: String,
}

impl ZonePair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl Display for ZonePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.destination)
    }
}

/// One firewall access rule as fetched from a device.
///
/// Port entries are kept as the raw tokens the device reported. Nothing here
/// checks that they are numeric; see [`is_valid_port_token`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// 1-based position in the scope's rule list.
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ports: Vec<String>,
    #[serde(default)]
    pub zones: Option<ZonePair>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub action: Action,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            position: 0,
            name: String::new(),
            comment: String::new(),
            source: String::new(),
            ports: Vec::new(),
            zones: None,
            enabled: true,
            action: Action::Allow,
        }
    }
}

impl Rule {
    /// Identifier used when reporting on this rule.
    ///
    /// Name first, then comment, then `#<position>` when both are blank.
    pub fn identifier(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        let comment = self.comment.trim();
        if !comment.is_empty() {
            return comment.to_string();
        }
        format!("#{}", self.position)
    }

    pub fn has_description(&self) -> bool {
        !self.comment.trim().is_empty()
    }

    /// Port tokens with surrounding whitespace removed and blanks dropped.
    pub fn port_tokens(&self) -> impl Iterator<Item = &str> {
        self.ports.iter().map(|p| p.trim()).filter(|p| !p.is_empty())
    }
}

fn default_enabled() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A NAT policy. Only counted by the audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatPolicy {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_destination: String,
    #[serde(default)]
    pub translated_destination: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// VPN configuration of a scope. Only counted by the audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub peers: usize,
}

/// Everything fetched for one network or device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub name: String,
    /// Whether rules carry zone pairs (SonicWALL) or not (Meraki).
    #[serde(default)]
    pub zone_aware: bool,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub nat_policies: Vec<NatPolicy>,
    #[serde(default)]
    pub vpn: Option<VpnConfig>,
}

impl ScopeConfig {
    pub fn new(name: impl Into<String>, zone_aware: bool) -> Self {
        Self {
            name: name.into(),
            zone_aware,
            ..Self::default()
        }
    }

    /// Assign fetch-order positions to rules that do not have one yet.
    pub fn number_rules(&mut self) {
        for (idx, rule) in self.rules.iter_mut().enumerate() {
            if rule.position == 0 {
                rule.position = idx + 1;
            }
        }
    }
}

/// Check a port token: a number in 1..=65535 or a range `low-high` of such numbers.
pub fn is_valid_port_token(token: &str) -> bool {
    let token = token.trim();
    match token.split_once('-') {
        Some((low, high)) => match (parse_port(low), parse_port(high)) {
            (Some(low), Some(high)) => low <= high,
            _ => false,
        },
        None => parse_port(token).is_some(),
    }
}

fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse::<u16>().ok().filter(|p| *p != 0)
}
