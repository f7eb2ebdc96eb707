use std::borrow::Cow;

use serde::Serialize;

use crate::issue::Issue;
use crate::summary::ConfigSummary;

/// Column order of the CSV extract. Downstream tooling depends on it.
pub const CSV_COLUMNS: [&str; 4] = ["Type", "Item", "Value", "Note"];

/// One CSV row. Summary rows have `kind == "Summary"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Note")]
    pub note: String,
}

impl CsvRow {
    fn new(kind: &str, item: &str, value: String, note: &str) -> Self {
        Self {
            kind: kind.to_string(),
            item: item.to_string(),
            value,
            note: note.to_string(),
        }
    }

    pub fn fields(&self) -> [&str; 4] {
        [&self.kind, &self.item, &self.value, &self.note]
    }
}

/// Build CSV rows: four summary rows, then one row per issue.
pub fn render_csv(issues: &[Issue], summary: &ConfigSummary) -> Vec<CsvRow> {
    let mut rows = vec![
        CsvRow::new(
            "Summary",
            "Networks",
            summary.networks.to_string(),
            "Networks audited",
        ),
        CsvRow::new(
            "Summary",
            "Rules",
            summary.rules.to_string(),
            "Firewall rules",
        ),
        CsvRow::new(
            "Summary",
            "NatPolicies",
            summary.nat_policies.to_string(),
            "NAT policies",
        ),
        CsvRow::new(
            "Summary",
            "VpnConfigs",
            summary.vpn_configs.to_string(),
            "VPN configurations",
        ),
    ];
    rows.extend(issues.iter().map(|issue| CsvRow {
        kind: issue.kind().to_string(),
        item: issue.rule().to_string(),
        value: issue.severity().to_string(),
        note: issue.message().to_string(),
    }));
    rows
}

/// Serialize rows with a header line, quoting fields as RFC 4180 requires.
pub fn csv_to_string(rows: &[CsvRow]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push_str("\r\n");
    for row in rows {
        let line = row.fields().map(quote).join(",");
        out.push_str(&line);
        out.push_str("\r\n");
    }
    out
}

fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
