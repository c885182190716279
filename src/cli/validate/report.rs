//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ValidationError {
    /// The link that failed.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Findings of one validation pass, grouped by source file.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Targets that resolve to no page and no file.
    pub links: BTreeMap<String, Vec<ValidationError>>,
    /// Pages that exist but lack the requested anchor.
    pub anchors: BTreeMap<String, Vec<ValidationError>>,
    /// Suspicious but not broken, never fail a run.
    pub warnings: BTreeMap<String, Vec<ValidationError>>,
}

impl ValidationReport {
    /// Add a broken link.
    pub fn add_link(&mut self, source: String, target: String, reason: String) {
        push(&mut self.links, source, target, reason);
    }

    /// Add a missing anchor.
    pub fn add_anchor(&mut self, source: String, target: String, reason: String) {
        push(&mut self.anchors, source, target, reason);
    }

    pub fn add_warning(&mut self, source: String, target: String, reason: String) {
        push(&mut self.warnings, source, target, reason);
    }

    /// Total broken link count.
    pub fn link_error_count(&self) -> usize {
        count(&self.links)
    }

    /// Total missing anchor count.
    pub fn anchor_error_count(&self) -> usize {
        count(&self.anchors)
    }

    pub fn warning_count(&self) -> usize {
        count(&self.warnings)
    }

    /// Errors only; warnings are not counted.
    pub fn error_count(&self) -> usize {
        self.link_error_count() + self.anchor_error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Print the full report to stderr (links -> anchors -> warnings).
    pub fn print(&self) {
        print_section("links", &self.links, false);
        print_section("anchors", &self.anchors, false);
        print_section("warnings", &self.warnings, true);
    }
}

fn push(
    section: &mut BTreeMap<String, Vec<ValidationError>>,
    source: String,
    target: String,
    reason: String,
) {
    section
        .entry(source)
        .or_default()
        .push(ValidationError { target, reason });
}

fn count(section: &BTreeMap<String, Vec<ValidationError>>) -> usize {
    section.values().map(Vec::len).sum()
}

/// Print section with format (target + reason for non-empty reason).
fn print_section(name: &str, errors: &BTreeMap<String, Vec<ValidationError>>, warning: bool) {
    if errors.is_empty() {
        return;
    }
    eprintln!();

    let file_count = errors.len();
    let error_count = count(errors);
    let kind = if warning { "warning" } else { "error" };

    // Section header
    let header = if warning {
        name.yellow().bold().to_string()
    } else {
        name.red().bold().to_string()
    };
    eprintln!(
        "{} {}",
        header,
        format!(
            "({file_count} file{}, {error_count} {kind}{})",
            plural_s(file_count),
            plural_s(error_count)
        )
        .dimmed()
    );

    for (path, errs) in errors {
        eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());

        // Resolution order is unspecified, keep output stable
        let mut errs: Vec<_> = errs.iter().collect();
        errs.sort();

        for e in errs {
            let arrow = if warning {
                "→".yellow().to_string()
            } else {
                "→".red().to_string()
            };
            if e.reason.is_empty() {
                eprintln!("{} {}", arrow, e.target);
            } else {
                eprintln!("{} {} {}", arrow, e.target, e.reason);
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        let warnings = self.warning_count();

        if total == 0 {
            write!(f, "{}", "all links valid".green())?;
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )?;
        }

        if warnings > 0 {
            write!(
                f,
                " {}",
                format!("({warnings} warning{})", plural_s(warnings)).yellow()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = ValidationReport::default();
        assert!(!report.has_errors());

        report.add_link("a.md".into(), "`b.md`".into(), "not found".into());
        report.add_link("a.md".into(), "`c.md`".into(), "not found".into());
        report.add_anchor("c.md".into(), "`#x`".into(), "missing anchor".into());
        report.add_warning("c.md".into(), "`logo.png#x`".into(), "fragment on asset".into());

        assert_eq!(report.link_error_count(), 2);
        assert_eq!(report.anchor_error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 3);
        assert!(report.has_errors());
        assert_eq!(report.links.len(), 1);
    }

    #[test]
    fn test_warnings_alone_are_not_errors() {
        let mut report = ValidationReport::default();
        report.add_warning("a.md".into(), "`x.png#y`".into(), String::new());
        assert!(!report.has_errors());
        assert!(report.to_string().contains("1 warning"));
    }
}
