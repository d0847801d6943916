//! Display formatting for CLI output
//!
//! Lint findings are grouped per distribution and printed with
//! severity icons.

use console::style;
use std::collections::BTreeMap;

/// Finding severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A lint finding for one distribution
#[derive(Debug, Clone)]
pub struct LintIssue {
    pub severity: Severity,
    pub distribution: String,
    pub message: String,
    pub suggestion: Option<String>,
}

/// Grouped lint results for display
#[derive(Debug, Default)]
pub struct LintReport {
    pub issues: Vec<LintIssue>,
    pub checked: usize,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, distribution: &str, message: &str, suggestion: Option<String>) {
        self.issues.push(LintIssue {
            severity: Severity::Error,
            distribution: distribution.to_string(),
            message: message.to_string(),
            suggestion,
        });
    }

    pub fn add_warning(&mut self, distribution: &str, message: &str, suggestion: Option<String>) {
        self.issues.push(LintIssue {
            severity: Severity::Warning,
            distribution: distribution.to_string(),
            message: message.to_string(),
            suggestion,
        });
    }

    /// Display issues grouped by distribution
    pub fn display(&self) {
        let mut by_distro: BTreeMap<&str, Vec<&LintIssue>> = BTreeMap::new();
        for issue in &self.issues {
            by_distro.entry(&issue.distribution).or_default().push(issue);
        }

        for (distro, issues) in by_distro {
            println!();
            println!("{}", style(distro).cyan().bold());

            for issue in issues {
                let icon = match issue.severity {
                    Severity::Error => style("✗").red(),
                    Severity::Warning => style("⚠").yellow(),
                };
                println!("  {} {}", icon, issue.message);

                if let Some(suggestion) = &issue.suggestion {
                    println!("    {} {}", style("hint:").blue(), suggestion);
                }
            }
        }
    }

    /// (errors, warnings)
    pub fn summary(&self) -> (usize, usize) {
        let errors = self
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        (errors, self.issues.len() - errors)
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Print the one-line summary
    pub fn display_summary(&self) {
        let (errors, warnings) = self.summary();
        println!();
        if errors == 0 && warnings == 0 {
            println!(
                "{} {} distribution(s) valid",
                style("✓").green().bold(),
                self.checked
            );
        } else if errors == 0 {
            println!(
                "{} {} distribution(s) valid, {} warning(s)",
                style("⚠").yellow().bold(),
                self.checked,
                warnings
            );
        } else {
            println!(
                "{} {} error(s), {} warning(s)",
                style("✗").red().bold(),
                errors,
                warnings
            );
        }
    }
}

/// Render a yes/no flag with color
pub fn flag(value: bool) -> console::StyledObject<&'static str> {
    if value {
        style("yes").yellow()
    } else {
        style("no").dim()
    }
}
