//! Lint command - validate a definitions directory

use console::style;
use distreg_core::{DistributionFile, DistroError, load_distro_registry};
use serde::Serialize;
use std::path::Path;

use crate::display::{LintReport, flag};
use crate::error::{CliError, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DistributionSummary<'a> {
    name: &'a str,
    description: &'a str,
    architectures: Vec<&'a str>,
    restricted: bool,
    requires_entitlement: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    valid: bool,
    directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    distributions: Vec<DistributionSummary<'a>>,
    warnings: Vec<String>,
}

pub fn run(dir: &Path, json: bool) -> Result<()> {
    if !json {
        println!(
            "{} Linting distributions in {}",
            style("→").blue(),
            dir.display()
        );
    }

    let registry = match load_distro_registry(dir) {
        Ok(registry) => registry,
        Err(err) => return fail(dir, err, json),
    };

    let mut report = LintReport::new();
    let distros: Vec<_> = registry.available(true).iter().collect();
    report.checked = distros.len();
    for distro in &distros {
        check(distro, &mut report);
    }

    if json {
        let output = JsonReport {
            valid: true,
            directory: dir.display().to_string(),
            error: None,
            distributions: distros.iter().map(|d| summarize(d)).collect(),
            warnings: report
                .issues
                .iter()
                .map(|i| format!("{}: {}", i.distribution, i.message))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for distro in &distros {
        println!(
            "  {} {} ({} architecture(s), restricted: {}, entitlement: {})",
            style("✓").green(),
            style(distro.name()).bold(),
            distro.architectures.len(),
            flag(distro.is_restricted()),
            flag(distro.requires_entitlement())
        );
    }

    report.display();
    report.display_summary();
    Ok(())
}

fn fail(dir: &Path, err: DistroError, json: bool) -> Result<()> {
    let subject = match &err {
        DistroError::InvalidDistribution { distribution, .. } => distribution.clone(),
        DistroError::DuplicateDefinition { name } => name.clone(),
        _ => dir.display().to_string(),
    };
    let cli_err = CliError::from(err);

    if json {
        let output = JsonReport {
            valid: false,
            directory: dir.display().to_string(),
            error: Some(cli_err.to_string()),
            distributions: Vec::new(),
            warnings: Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let mut report = LintReport::new();
        report.add_error(&subject, &cli_err.to_string(), None);
        report.display();
        report.display_summary();
    }

    Err(CliError::lint_failed(1, &cli_err))
}

/// Non-fatal findings: things that load fine but are likely mistakes
fn check(distro: &DistributionFile, report: &mut LintReport) {
    let name = distro.name();

    if distro.architectures.is_empty() {
        report.add_warning(name, "no architectures defined", None);
    }
    if distro.description().is_empty() {
        report.add_warning(name, "missing description", None);
    }

    for (arch_name, arch) in &distro.architectures {
        if arch.image_types.is_empty() {
            report.add_warning(name, &format!("{} has no image types", arch_name), None);
        }
        if arch.repositories.is_empty() {
            report.add_warning(name, &format!("{} has no repositories", arch_name), None);
        }
        if !distro.distribution.no_package_list && arch.packages.is_none() {
            report.add_warning(
                name,
                &format!("{} has no package list", arch_name),
                Some(format!(
                    "add {}-{}-packages.json or set no_package_list",
                    name, arch_name
                )),
            );
        }
    }
}

fn summarize(distro: &DistributionFile) -> DistributionSummary<'_> {
    DistributionSummary {
        name: distro.name(),
        description: distro.description(),
        architectures: distro.architecture_names().collect(),
        restricted: distro.is_restricted(),
        requires_entitlement: distro.requires_entitlement(),
    }
}
