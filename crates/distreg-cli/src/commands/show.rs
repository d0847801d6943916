//! Show command - display one distribution

use console::style;
use distreg_core::{Architecture, DistributionFile};
use std::path::Path;

use super::load_registry;
use crate::display::flag;
use crate::error::Result;

pub fn run(dir: &Path, name: &str, entitled: bool, arch: Option<&str>, show_all: bool) -> Result<()> {
    let registry = load_registry(dir)?;
    let distro = registry.available(entitled).get(name)?;

    // Resolve the architecture before printing anything
    let arches: Vec<&Architecture> = match arch {
        Some(arch) => vec![distro.architecture(arch)?],
        None => distro.architectures.values().collect(),
    };

    print_header(distro);
    for arch in arches {
        print_architecture(arch, show_all);
    }

    Ok(())
}

fn print_header(distro: &DistributionFile) {
    println!("{}", style(distro.name()).cyan().bold());
    println!("{}", style("=".repeat(distro.name().len())).dim());
    println!();

    if !distro.description().is_empty() {
        println!("{}: {}", style("Description").bold(), distro.description());
    }
    if let Some(platform) = &distro.module_platform_id {
        println!("{}: {}", style("Platform").bold(), platform);
    }
    println!("{}: {}", style("Restricted").bold(), flag(distro.is_restricted()));
    println!(
        "{}: {}",
        style("Requires entitlement").bold(),
        flag(distro.requires_entitlement())
    );
    if distro.distribution.no_package_list {
        println!("{}: none", style("Package list").bold());
    }
}

fn print_architecture(arch: &Architecture, show_all: bool) {
    println!();
    println!("{}", style(&arch.name).bold());
    println!("  {}: {}", style("Image types").dim(), arch.image_types.join(", "));

    if let Some(packages) = &arch.packages {
        println!("  {}: {}", style("Packages").dim(), packages.len());
    }

    if show_all && !arch.repositories.is_empty() {
        println!("  {}:", style("Repositories").dim());
        for repo in &arch.repositories {
            let url = repo.source().map(|s| s.url().to_string()).unwrap_or_default();
            let mut notes = Vec::new();
            if repo.rhsm {
                notes.push("rhsm".to_string());
            }
            if !repo.image_type_tags.is_empty() {
                notes.push(format!("only {}", repo.image_type_tags.join(",")));
            }

            if notes.is_empty() {
                println!("    - {} {}", repo.display_id(), url);
            } else {
                println!(
                    "    - {} {} {}",
                    repo.display_id(),
                    url,
                    style(format!("({})", notes.join("; "))).dim()
                );
            }
        }
    }
}
