use crate::analyze::conflict::{ClaimKey, ClaimTable};
use crate::issue::{Issue, IssueKind};
use crate::model::{Action, Rule, ScopeConfig};
use crate::policy::AuditPolicy;

/// Analyze every scope independently and concatenate the findings in scope order.
pub fn analyze_scopes(scopes: &[ScopeConfig], policy: &AuditPolicy) -> Vec<Issue> {
    scopes
        .iter()
        .flat_map(|scope| analyze_scope(scope, policy))
        .collect()
}

/// Analyze one scope's rules. Findings are tagged with the scope name.
pub fn analyze_scope(scope: &ScopeConfig, policy: &AuditPolicy) -> Vec<Issue> {
    analyze_rules(&scope.rules, scope.zone_aware, policy)
        .into_iter()
        .map(|issue| issue.in_scope(scope.name.as_str()))
        .collect()
}

/// Run all checks over `rules` in fetch order.
///
/// Each rule goes through every check in a fixed order (source restriction,
/// high-risk ports, conflicts, documentation, disabled) and can collect
/// several findings. Conflict claims live only for this call.
pub fn analyze_rules(rules: &[Rule], zone_aware: bool, policy: &AuditPolicy) -> Vec<Issue> {
    let mut out = Vec::new();
    let mut claims = ClaimTable::new();

    for rule in rules {
        let id = rule.identifier();
        check_source(rule, &id, zone_aware, policy, &mut out);
        check_high_risk_ports(rule, &id, policy, &mut out);
        check_conflicts(rule, &id, zone_aware, &mut claims, &mut out);
        check_documentation(rule, &id, &mut out);
        if zone_aware {
            check_disabled(rule, &id, &mut out);
        }
    }
    out
}

fn check_source(
    rule: &Rule,
    id: &str,
    zone_aware: bool,
    policy: &AuditPolicy,
    out: &mut Vec<Issue>,
) {
    if policy.is_unrestricted_source(&rule.source) {
        out.push(Issue::new(
            IssueKind::SecurityRisk,
            id,
            format!(
                "Unrestricted source/WAN access: rule '{id}' accepts traffic from source '{}'",
                rule.source.trim()
            ),
        ));
        return;
    }

    let from_wan = rule
        .zones
        .as_ref()
        .is_some_and(|zones| policy.is_wan_zone(&zones.source));
    if zone_aware && from_wan && rule.action == Action::Allow {
        out.push(Issue::new(
            IssueKind::SecurityRisk,
            id,
            format!(
                "Unrestricted source/WAN access: rule '{id}' allows traffic from zone '{}'",
                policy.wan_zone
            ),
        ));
    }
}

fn check_high_risk_ports(rule: &Rule, id: &str, policy: &AuditPolicy, out: &mut Vec<Issue>) {
    for token in rule.port_tokens() {
        if let Some(port) = policy.high_risk_port(token) {
            out.push(
                Issue::new(
                    IssueKind::SecurityRisk,
                    id,
                    format!("High-risk port {port} is open in rule '{id}'"),
                )
                .with_port(token),
            );
        }
    }
}

fn check_conflicts(
    rule: &Rule,
    id: &str,
    zone_aware: bool,
    claims: &mut ClaimTable,
    out: &mut Vec<Issue>,
) {
    let zones = if zone_aware { rule.zones.clone() } else { None };
    let path = zones
        .as_ref()
        .map(|z| format!(" on {z}"))
        .unwrap_or_default();

    for token in rule.port_tokens() {
        let key = ClaimKey::new(zones.clone(), token);
        if let Some(prior) = claims.claim(key, id) {
            out.push(
                Issue::new(
                    IssueKind::Conflict,
                    id,
                    format!(
                        "Port {token}{path} is already claimed by rule '{prior}'; rule '{id}' overlaps it"
                    ),
                )
                .with_port(token),
            );
        }
    }
}

fn check_documentation(rule: &Rule, id: &str, out: &mut Vec<Issue>) {
    if !rule.has_description() {
        out.push(Issue::new(
            IssueKind::Documentation,
            id,
            format!("Rule '{id}' has no description"),
        ));
    }
}

fn check_disabled(rule: &Rule, id: &str, out: &mut Vec<Issue>) {
    if !rule.enabled {
        out.push(Issue::new(
            IssueKind::Maintenance,
            id,
            format!("Rule '{id}' is disabled and should be removed if not needed"),
        ));
    }
}
