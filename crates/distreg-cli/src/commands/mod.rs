//! CLI commands

pub mod access;
pub mod lint;
pub mod list;
pub mod search;
pub mod show;

use distreg_core::{DistroRegistry, SearchPolicy, load_distro_registry};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Settings resolved from the config file and command line flags
#[derive(Debug, Clone)]
pub struct Settings {
    pub distributions_dir: PathBuf,
    pub allow_file: Option<PathBuf>,
    pub search_policy: SearchPolicy,
}

/// Load the full registry from `dir`
pub fn load_registry(dir: &Path) -> Result<DistroRegistry> {
    tracing::debug!(dir = %dir.display(), "loading distribution registry");
    Ok(load_distro_registry(dir)?)
}
