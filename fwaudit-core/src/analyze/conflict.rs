use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::model::ZonePair;

/// Key under which a rule claims a destination port.
///
/// Zone-unaware scopes use `zones: None`, so every rule in the scope shares
/// one port namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimKey {
    pub zones: Option<ZonePair>,
    pub port: String,
}

impl ClaimKey {
    pub fn new(zones: Option<ZonePair>, port: impl Into<String>) -> Self {
        Self {
            zones,
            port: port.into(),
        }
    }
}

/// First-claim-wins table of port claims, kept in insertion order.
///
/// An entry is written once, by the first rule that claims the key, and is
/// never replaced. Later claimants only learn who got there first.
#[derive(Debug, Default)]
pub struct ClaimTable {
    claims: IndexMap<ClaimKey, String>,
}

impl ClaimTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rule` as claimant of `key`.
    ///
    /// Returns the earlier claimant when the key is already taken.
    pub fn claim(&mut self, key: ClaimKey, rule: &str) -> Option<&str> {
        match self.claims.entry(key) {
            Entry::Occupied(entry) => Some(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                entry.insert(rule.to_string());
                None
            }
        }
    }

}
