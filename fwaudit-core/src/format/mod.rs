//! Report renderers.

pub mod csv;
pub mod html;
pub mod json;
pub mod text;

use crate::issue::Issue;
use crate::summary::ConfigSummary;

pub use csv::{csv_to_string, render_csv, CsvRow, CSV_COLUMNS};
pub use html::{render_html, render_html_with_title, severity_class};
pub use json::render_json;
pub use text::render_text;

/// Report artifact formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Render the full artifact body. `title` is used by HTML only.
    pub fn render(self, title: &str, issues: &[Issue], summary: &ConfigSummary) -> String {
        match self {
            Self::Html => render_html_with_title(title, issues, summary),
            Self::Csv => csv_to_string(&render_csv(issues, summary)),
            Self::Json => render_json(issues, summary),
        }
    }
}
