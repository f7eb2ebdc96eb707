use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use colored::Colorize;
use fwaudit_core::{render_text, write_report, ConfigSummary, Issue, ReportFormat, WriteError};
use log::warn;

use crate::fetch::Vendor;

/// Render the audit summary for terminal output, colored by severity.
pub fn render_console(issues: &[Issue], summary: &ConfigSummary) -> String {
    let raw = render_text(issues, summary);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with("- [high]") {
            line.red().to_string()
        } else if line.starts_with("- [medium]") {
            line.yellow().to_string()
        } else if line.starts_with("- [low]") {
            line.green().to_string()
        } else if line.starts_with("result ") {
            line.cyan().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}

/// `<Vendor>Audit_<yyyyMMdd_HHmmss>.<ext>`
pub fn report_file_name(vendor: Vendor, format: ReportFormat, at: &DateTime<Local>) -> String {
    format!(
        "{}Audit_{}.{}",
        vendor.display_name(),
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub fn report_title(vendor: Vendor) -> String {
    format!("{} Firewall Configuration Audit", vendor.display_name())
}

/// Path for `file_name` in `dir` that does not exist yet.
///
/// Names only resolve to the second, so a clash gets a `_2`, `_3`, ... suffix
/// before the extension instead of overwriting the earlier report.
pub fn unused_report_path(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    if !path.exists() {
        return path;
    }
    let (stem, ext) = file_name.rsplit_once('.').unwrap_or((file_name, ""));
    let mut n = 2;
    loop {
        let candidate = if ext.is_empty() {
            dir.join(format!("{stem}_{n}"))
        } else {
            dir.join(format!("{stem}_{n}.{ext}"))
        };
        if !candidate.exists() {
            warn!(
                "{} already exists; writing {} instead",
                path.display(),
                candidate.display()
            );
            return candidate;
        }
        n += 1;
    }
}

/// Render and write the report artifact into `dir`. Returns the written path.
pub fn write_report_file(
    dir: &Path,
    vendor: Vendor,
    format: ReportFormat,
    issues: &[Issue],
    summary: &ConfigSummary,
) -> Result<PathBuf, WriteError> {
    if !dir.is_dir() {
        return Err(WriteError::MissingDirectory(dir.to_path_buf()));
    }
    let path = unused_report_path(dir, &report_file_name(vendor, format, &Local::now()));
    let body = format.render(&report_title(vendor), issues, summary);
    write_report(&path, &body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use fwaudit_core::{ConfigSummary, ReportFormat};
    use tempfile::tempdir;

    use super::{render_console, report_file_name, unused_report_path, write_report_file};
    use crate::fetch::Vendor;

    #[test]
    fn file_name_is_timestamped() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .single()
            .expect("unambiguous time");
        assert_eq!(
            report_file_name(Vendor::Meraki, ReportFormat::Html, &at),
            "MerakiAudit_20240305_140709.html"
        );
        assert_eq!(
            report_file_name(Vendor::SonicWall, ReportFormat::Csv, &at),
            "SonicWallAudit_20240305_140709.csv"
        );
    }

    #[test]
    fn writes_into_directory() {
        let dir = tempdir().expect("tempdir");
        let path = write_report_file(
            dir.path(),
            Vendor::SonicWall,
            ReportFormat::Json,
            &[],
            &ConfigSummary::default(),
        )
        .expect("write");
        assert!(path.starts_with(dir.path()));
        let body = std::fs::read_to_string(&path).expect("read");
        assert!(body.contains("\"issues\": []"));
    }

    #[test]
    fn same_second_reports_do_not_overwrite() {
        let dir = tempdir().expect("tempdir");
        let name = "MerakiAudit_20240305_140709.html";
        assert_eq!(unused_report_path(dir.path(), name), dir.path().join(name));

        std::fs::write(dir.path().join(name), "first").expect("write");
        let second = unused_report_path(dir.path(), name);
        assert_eq!(second, dir.path().join("MerakiAudit_20240305_140709_2.html"));

        std::fs::write(&second, "second").expect("write");
        assert_eq!(
            unused_report_path(dir.path(), name),
            dir.path().join("MerakiAudit_20240305_140709_3.html")
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(name)).expect("read"),
            "first"
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        assert!(write_report_file(
            &missing,
            Vendor::Meraki,
            ReportFormat::Csv,
            &[],
            &ConfigSummary::default()
        )
        .is_err());
    }

    #[test]
    fn console_keeps_plain_lines() {
        colored::control::set_override(false);
        let text = render_console(&[], &ConfigSummary::default());
        assert!(text.ends_with("- none"));
    }
}
