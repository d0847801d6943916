//! List command - list distributions visible to the caller

use console::style;
use serde::Serialize;
use std::path::Path;

use super::load_registry;
use crate::display::flag;
use crate::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListEntry<'a> {
    name: &'a str,
    description: &'a str,
    architectures: Vec<&'a str>,
    restricted: bool,
}

/// Run the list command
pub fn run(dir: &Path, entitled: bool, output_json: bool) -> Result<()> {
    let registry = load_registry(dir)?;
    let view = registry.available(entitled);

    if output_json {
        let entries: Vec<_> = view
            .iter()
            .map(|d| ListEntry {
                name: d.name(),
                description: d.description(),
                architectures: d.architecture_names().collect(),
                restricted: d.is_restricted(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No distributions found in {}", dir.display());
        return Ok(());
    }

    println!(
        "{:<24} {:<28} {:<12} {}",
        style("NAME").bold(),
        style("ARCHITECTURES").bold(),
        style("RESTRICTED").bold(),
        style("DESCRIPTION").bold()
    );

    for distro in view.iter() {
        let arches: Vec<_> = distro.architecture_names().collect();
        println!(
            "{:<24} {:<28} {:<12} {}",
            distro.name(),
            arches.join(","),
            flag(distro.is_restricted()),
            distro.description()
        );
    }

    Ok(())
}
