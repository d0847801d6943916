//! Search command - search the package index of one architecture

use console::style;
use distreg_core::SearchPolicy;
use std::path::Path;

use super::load_registry;
use crate::error::Result;

pub struct SearchArgs<'a> {
    pub distro: &'a str,
    pub arch: &'a str,
    pub query: &'a str,
    pub entitled: bool,
    pub policy: SearchPolicy,
    pub json: bool,
}

pub fn run(dir: &Path, args: SearchArgs<'_>) -> Result<()> {
    let registry = load_registry(dir)?;
    let distro = registry.available(args.entitled).get(args.distro)?;
    let arch = distro.architecture(args.arch)?;

    let found = arch.find_packages_with(args.query, args.policy);
    tracing::debug!(
        distribution = args.distro,
        architecture = args.arch,
        query = args.query,
        matches = found.len(),
        "package search"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No packages matching '{}'", args.query);
        return Ok(());
    }

    let width = found
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    println!(
        "{:<width$}  {}",
        style("NAME").bold(),
        style("SUMMARY").bold(),
        width = width
    );
    for pkg in found {
        println!("{:<width$}  {}", pkg.name, pkg.summary, width = width);
    }

    Ok(())
}
