//! One audit run: authenticate, fetch every scope, analyze, summarize.
//!
//! Only authentication and scope listing can abort a run. A scope whose rules,
//! NAT policies or VPN config cannot be fetched is logged and audited with
//! whatever did arrive; the run fails only when no scope produced rule data.

use std::error::Error as StdError;

use fwaudit_core::{
    analyze_scopes, is_valid_port_token, AuditPolicy, ConfigSummary, Issue, ScopeConfig,
};
use log::{info, warn};
use thiserror::Error;

use crate::fetch::{AuthError, ConfigFetcher, FetchError, Scope};

#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("failed to list networks")]
    ScopeListing(#[source] FetchError),
    #[error("no rule data retrieved from {scopes} network(s)")]
    NoData { scopes: usize },
}

/// Analyzer output for a run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub issues: Vec<Issue>,
    pub summary: ConfigSummary,
}

impl AuditOutcome {
    pub fn has_high(&self) -> bool {
        self.summary.high > 0
    }
}

/// Authenticate and fetch the configuration of every scope the client exposes.
pub fn collect_scopes(fetcher: &mut dyn ConfigFetcher) -> Result<Vec<ScopeConfig>, AuditError> {
    let vendor = fetcher.vendor();
    info!("authenticating to {}", vendor.display_name());
    fetcher.authenticate()?;

    let scopes = fetcher.list_scopes().map_err(AuditError::ScopeListing)?;
    info!("auditing {} network(s)", scopes.len());

    let mut configs = Vec::with_capacity(scopes.len());
    let mut rule_failures = 0;
    for scope in &scopes {
        let (config, rules_ok) = collect_scope(fetcher, scope, vendor.zone_aware());
        if !rules_ok {
            rule_failures += 1;
        }
        configs.push(config);
    }

    if !scopes.is_empty() && rule_failures == scopes.len() {
        return Err(AuditError::NoData {
            scopes: scopes.len(),
        });
    }
    Ok(configs)
}

fn collect_scope(
    fetcher: &dyn ConfigFetcher,
    scope: &Scope,
    zone_aware: bool,
) -> (ScopeConfig, bool) {
    let mut config = ScopeConfig::new(scope.name.as_str(), zone_aware);

    let rules_ok = match fetcher.fetch_rules(scope) {
        Ok(rules) => {
            config.rules = rules;
            true
        }
        Err(err) => {
            warn!("network {}: rules unavailable: {}", scope.name, chain(&err));
            false
        }
    };
    match fetcher.fetch_nat_policies(scope) {
        Ok(nat) => config.nat_policies = nat,
        Err(err) => warn!(
            "network {}: NAT policies unavailable: {}",
            scope.name,
            chain(&err)
        ),
    }
    match fetcher.fetch_vpn_config(scope) {
        Ok(vpn) => config.vpn = vpn,
        Err(err) => warn!(
            "network {}: VPN config unavailable: {}",
            scope.name,
            chain(&err)
        ),
    }

    config.number_rules();
    warn_invalid_ports(&config);
    info!(
        "network {}: rules={} nat_policies={} vpn={}",
        config.name,
        config.rules.len(),
        config.nat_policies.len(),
        if config.vpn.is_some() { "yes" } else { "no" }
    );
    (config, rules_ok)
}

/// `err` followed by each of its causes, separated by `: `.
pub fn chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        cause = inner.source();
    }
    out
}

/// Log port tokens that are not a port or port range. They are still audited.
pub fn warn_invalid_ports(config: &ScopeConfig) {
    for rule in &config.rules {
        for token in rule.port_tokens().filter(|t| !is_valid_port_token(t)) {
            warn!(
                "network {}: rule '{}' has unrecognized port token '{token}'",
                config.name,
                rule.identifier()
            );
        }
    }
}

/// Analyze fetched scopes and build the run summary.
pub fn evaluate(scopes: &[ScopeConfig], policy: &AuditPolicy) -> AuditOutcome {
    let issues = analyze_scopes(scopes, policy);
    let summary = ConfigSummary::from_scopes(scopes, &issues);
    info!(
        "analysis complete: high={} medium={} low={}",
        summary.high, summary.medium, summary.low
    );
    AuditOutcome { issues, summary }
}
