use crate::issue::Issue;
use crate::summary::ConfigSummary;

/// Format a plain-text audit summary for terminals and logs.
///
/// Issue lines start with `- [high]`, `- [medium]` or `- [low]`.
pub fn render_text(issues: &[Issue], summary: &ConfigSummary) -> String {
    let mut out = Vec::with_capacity(issues.len() + 4);
    out.push(format!(
        "audit networks={} rules={} nat_policies={} vpn_configs={}",
        summary.networks, summary.rules, summary.nat_policies, summary.vpn_configs
    ));
    out.push(format!(
        "result high={} medium={} low={}",
        summary.high, summary.medium, summary.low
    ));
    out.push("issues".to_string());
    if issues.is_empty() {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for issue in issues {
        let scope = issue
            .scope()
            .map(|s| format!(" network={s}"))
            .unwrap_or_default();
        out.push(format!(
            "- [{}] {}{scope} rule={}: {}",
            issue.severity().css_class(),
            issue.kind(),
            issue.rule(),
            issue.message()
        ));
    }
    out.join("\n")
}
