use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Severity of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// CSS class used for report rows.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Report color for this severity.
    pub fn color(self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Medium => "orange",
            Self::Low => "green",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    SecurityRisk,
    Conflict,
    Documentation,
    Maintenance,
}

impl IssueKind {
    /// Fixed severity policy: the kind alone decides the severity.
    pub fn severity(self) -> Severity {
        match self {
            Self::SecurityRisk => Severity::High,
            Self::Conflict => Severity::Medium,
            Self::Documentation | Self::Maintenance => Severity::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SecurityRisk => "SecurityRisk",
            Self::Conflict => "Conflict",
            Self::Documentation => "Documentation",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding tied to a rule.
///
/// Issues are built through [`Issue::new`], which derives the severity from the
/// kind, and are not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    kind: IssueKind,
    rule: String,
    message: String,
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl Issue {
    pub fn new(kind: IssueKind, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule: rule.into(),
            message: message.into(),
            severity: kind.severity(),
            port: None,
            scope: None,
        }
    }

    /// Attach the port token the finding is about.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Attach the network/device name the rule belongs to.
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}
