use serde::Serialize;

use crate::issue::{Issue, Severity};
use crate::model::ScopeConfig;

/// Aggregate counters for one audit run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub networks: usize,
    pub rules: usize,
    pub nat_policies: usize,
    pub vpn_configs: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ConfigSummary {
    pub fn from_scopes(scopes: &[ScopeConfig], issues: &[Issue]) -> Self {
        let mut summary = Self {
            networks: scopes.len(),
            rules: scopes.iter().map(|s| s.rules.len()).sum(),
            nat_policies: scopes.iter().map(|s| s.nat_policies.len()).sum(),
            vpn_configs: scopes.iter().filter(|s| s.vpn.is_some()).count(),
            ..Self::default()
        };
        for issue in issues {
            match issue.severity() {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total_issues(&self) -> usize {
        self.high + self.medium + self.low
    }
}
