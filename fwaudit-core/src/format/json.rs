use serde::Serialize;

use crate::issue::Issue;
use crate::summary::ConfigSummary;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a ConfigSummary,
    issues: &'a [Issue],
}

/// Format the summary and issues as a pretty JSON document.
pub fn render_json(issues: &[Issue], summary: &ConfigSummary) -> String {
    serde_json::to_string_pretty(&JsonReport { summary, issues })
        .unwrap_or_else(|_| "{}".to_string())
}
