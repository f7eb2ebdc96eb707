//! Vendor-independent firewall rule auditing.
//!
//! This crate holds the parts of a firewall audit that do not care where the
//! rules came from:
//!
//! - [`model`]: rules, NAT policies, VPN configs and per-scope bundles
//! - [`policy`]: the audit thresholds (high-risk ports, unrestricted source, WAN zone)
//! - [`analyze`]: the single-pass rule analyzer with first-claim-wins conflict detection
//! - [`summary`]: run counters
//! - [`format`]: HTML, CSV, JSON and text renderers
//! - [`writer`]: writing a rendered report to disk
//!
//! ```
//! use fwaudit_core::{analyze_rules, AuditPolicy, IssueKind, Rule};
//!
//! let rule = Rule {
//!     position: 1,
//!     source: "any".to_string(),
//!     ports: vec!["3389".to_string()],
//!     ..Rule::default()
//! };
//! let issues = analyze_rules(&[rule], false, &AuditPolicy::default());
//! assert_eq!(issues.len(), 3);
//! assert_eq!(issues[0].kind(), IssueKind::SecurityRisk);
//! ```

pub mod analyze;
pub mod format;
pub mod issue;
pub mod model;
pub mod policy;
pub mod summary;
pub mod writer;

pub use analyze::{analyze_rules, analyze_scope, analyze_scopes, ClaimKey, ClaimTable};
pub use format::{
    csv_to_string, render_csv, render_html, render_html_with_title, render_json, render_text,
    severity_class, CsvRow, ReportFormat, CSV_COLUMNS,
};
pub use issue::{Issue, IssueKind, Severity};
pub use model::{is_valid_port_token, Action, NatPolicy, Rule, ScopeConfig, VpnConfig, ZonePair};
pub use policy::{load_policy_with_source, AuditPolicy, PolicyError};
pub use summary::ConfigSummary;
pub use writer::{write_report, WriteError};
