//! Access command - check an organization may build a distribution

use console::style;
use distreg_core::{FileAllowList, authorize};
use std::path::Path;

use super::load_registry;
use crate::error::Result;

pub fn run(
    dir: &Path,
    allow_file: Option<&Path>,
    distro: &str,
    org_id: &str,
    entitled: bool,
) -> Result<()> {
    let registry = load_registry(dir)?;
    let allow_list = FileAllowList::load(allow_file)?;

    let found = authorize(registry.available(entitled), &allow_list, org_id, distro)?;

    println!(
        "{} organization {} allowed to build {}",
        style("✓").green(),
        org_id,
        style(found.name()).bold()
    );
    Ok(())
}
