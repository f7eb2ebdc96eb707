use std::fmt::Write as _;

use crate::issue::{Issue, Severity};
use crate::summary::ConfigSummary;

const DEFAULT_TITLE: &str = "Firewall Configuration Audit";

/// CSS class for a severity. Report rows carry exactly this class.
pub fn severity_class(severity: Severity) -> &'static str {
    severity.css_class()
}

/// Render a self-contained HTML report with the default title.
pub fn render_html(issues: &[Issue], summary: &ConfigSummary) -> String {
    render_html_with_title(DEFAULT_TITLE, issues, summary)
}

/// Render a self-contained HTML report: summary block, then one table row per issue.
pub fn render_html_with_title(title: &str, issues: &[Issue], summary: &ConfigSummary) -> String {
    let title = escape(title);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str(&stylesheet());
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");

    html.push_str("<div class=\"summary\">\n<h2>Summary</h2>\n<ul>\n");
    let counts = [
        ("Networks", summary.networks),
        ("Rules", summary.rules),
        ("NAT policies", summary.nat_policies),
        ("VPN configurations", summary.vpn_configs),
    ];
    for (label, count) in counts {
        let _ = writeln!(html, "<li>{label}: {count}</li>");
    }
    for severity in Severity::ALL {
        let _ = writeln!(
            html,
            "<li class=\"{}\">{} severity issues: {}</li>",
            severity_class(severity),
            severity,
            summary.count(severity)
        );
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str("<table>\n<thead>\n<tr><th>Network</th><th>Type</th><th>Rule</th><th>Severity</th><th>Message</th></tr>\n</thead>\n<tbody>\n");
    for issue in issues {
        let _ = writeln!(
            html,
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            severity_class(issue.severity()),
            escape(issue.scope().unwrap_or("")),
            issue.kind(),
            escape(issue.rule()),
            issue.severity(),
            escape(issue.message())
        );
    }
    html.push_str("</tbody>\n</table>\n");
    if issues.is_empty() {
        html.push_str("<p class=\"empty\">No issues found.</p>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn stylesheet() -> String {
    let mut css = String::from("<style>\n");
    css.push_str("body { font-family: Arial, sans-serif; margin: 20px; }\n");
    css.push_str("table { border-collapse: collapse; width: 100%; }\n");
    css.push_str("th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n");
    css.push_str("th { background-color: #f2f2f2; }\n");
    css.push_str(".summary { background-color: #f9f9f9; padding: 10px; margin-bottom: 20px; }\n");
    for severity in Severity::ALL {
        let _ = writeln!(
            css,
            ".{} {{ color: {}; }}",
            severity_class(severity),
            severity.color()
        );
    }
    css.push_str("</style>\n");
    css
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape, severity_class};
    use crate::issue::Severity;

    #[test]
    fn severity_classes() {
        let table = [
            (Severity::High, "high"),
            (Severity::Medium, "medium"),
            (Severity::Low, "low"),
        ];
        for (severity, class) in table {
            assert_eq!(severity_class(severity), class);
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>"a" & 'b'</script>"#),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
    }
}
