//! Loading distribution definitions from disk
//!
//! A definitions directory holds one unit per distribution:
//!
//! ```text
//! distributions/
//!   rhel-90/
//!     rhel-90.json                    # definition (.json, .yaml or .yml)
//!     rhel-90-x86_64-packages.json    # optional package list per architecture
//!   fedora-39/
//!     fedora-39.yaml
//! ```
//!
//! Package lists are kept out of the definition because they are large.
//! An architecture may also list its packages inline; an external file
//! wins when both are present.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::distribution::DistributionFile;
use crate::error::{DistroError, Result, ValidationError};
use crate::package::PackageIndex;
use crate::registry::DistroRegistry;

const DEFINITION_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Load every distribution unit under `dir` into a registry
///
/// Any malformed or invalid unit fails the whole load.
pub fn load_distro_registry(dir: impl AsRef<Path>) -> Result<DistroRegistry> {
    let dir = dir.as_ref();
    ensure_dir(dir)?;

    let mut distros = BTreeMap::new();
    for name in unit_names(dir)? {
        let distro = match read_distribution(dir, &name) {
            Ok(distro) => distro,
            Err(DistroError::DistributionNotFound { .. }) => {
                tracing::debug!(unit = %name, "skipping directory without a definition");
                continue;
            }
            Err(e) => return Err(e),
        };
        distros.insert(name, Arc::new(distro));
    }

    let registry = DistroRegistry::new(distros);
    tracing::info!(
        dir = %dir.display(),
        distributions = registry.len(),
        "loaded distribution registry"
    );
    Ok(registry)
}

/// Load a single distribution unit by name
///
/// Fails with [`DistroError::DistributionNotFound`] when `dir` holds no
/// definition for `name`; a definition that exists but is malformed
/// surfaces its parse or validation error instead.
pub fn read_distribution(dir: impl AsRef<Path>, name: &str) -> Result<DistributionFile> {
    let dir = dir.as_ref();
    if !is_unit_name(name) {
        return Err(DistroError::DistributionNotFound {
            name: name.to_string(),
        });
    }
    let unit_dir = dir.join(name);

    let definition = find_definition(&unit_dir, name)?.ok_or_else(|| {
        DistroError::DistributionNotFound {
            name: name.to_string(),
        }
    })?;

    let mut distro = parse_definition(&definition)?;
    if distro.name() != name {
        return Err(DistroError::InvalidDistribution {
            distribution: name.to_string(),
            source: ValidationError::NameMismatch {
                expected: name.to_string(),
                found: distro.name().to_string(),
            },
        });
    }

    distro.name_architectures();
    attach_packages(&mut distro, &unit_dir)?;

    distro
        .validate()
        .map_err(|source| DistroError::InvalidDistribution {
            distribution: name.to_string(),
            source,
        })?;

    tracing::debug!(
        distribution = name,
        architectures = distro.architectures.len(),
        packages = distro
            .architectures
            .values()
            .filter_map(|a| a.packages.as_ref())
            .map(PackageIndex::len)
            .sum::<usize>(),
        "loaded distribution"
    );
    Ok(distro)
}

/// Unit names are single, non-hidden path components
fn is_unit_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

fn ensure_dir(dir: &Path) -> Result<()> {
    match stat(dir)? {
        Some(meta) if meta.is_dir() => Ok(()),
        _ => Err(DistroError::DefinitionsDirNotFound {
            path: dir.to_path_buf(),
        }),
    }
}

/// Metadata of `path`, following symlinks; `None` only when nothing is there
///
/// A symlink whose target is missing is an error, as is any failure other
/// than `NotFound`.
fn stat(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.file_type().is_symlink() => Ok(Some(meta)),
        Ok(_) => fs::metadata(path)
            .map(Some)
            .map_err(|e| DistroError::io(path, e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DistroError::io(path, e)),
    }
}

/// Names of candidate units, sorted; hidden directories are skipped
///
/// Symlinked unit directories are followed, the same way a single
/// [`read_distribution`] resolves them.
fn unit_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            DistroError::io(path, io::Error::from(e))
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            return Err(DistroError::io(
                entry.path(),
                io::Error::new(io::ErrorKind::InvalidData, "unit name is not valid UTF-8"),
            ));
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name.to_string());
    }

    Ok(names)
}

/// Locate `<unit_dir>/<name>.{json,yaml,yml}`; more than one is an error
fn find_definition(unit_dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    match stat(unit_dir)? {
        Some(meta) if meta.is_dir() => {}
        _ => return Ok(None),
    }

    let mut found: Option<PathBuf> = None;
    for ext in DEFINITION_EXTENSIONS {
        let candidate = unit_dir.join(format!("{}.{}", name, ext));
        if stat(&candidate)?.is_some_and(|meta| meta.is_file()) {
            if found.is_some() {
                return Err(DistroError::DuplicateDefinition {
                    name: name.to_string(),
                });
            }
            found = Some(candidate);
        }
    }
    Ok(found)
}

fn parse_definition(path: &Path) -> Result<DistributionFile> {
    let content = std::fs::read_to_string(path).map_err(|e| DistroError::io(path, e))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(&content).map_err(|e| DistroError::parse(path, e))
    } else {
        serde_yaml::from_str(&content).map_err(|e| DistroError::parse(path, e))
    }
}

/// Path of the external package list for one architecture of a unit
pub fn package_list_path(unit_dir: &Path, name: &str, arch: &str) -> PathBuf {
    unit_dir.join(format!("{}-{}-packages.json", name, arch))
}

fn attach_packages(distro: &mut DistributionFile, unit_dir: &Path) -> Result<()> {
    let name = distro.distribution.name.clone();

    if distro.distribution.no_package_list {
        for arch in distro.architectures.values_mut() {
            if arch.packages.take().is_some() {
                tracing::warn!(
                    distribution = %name,
                    arch = %arch.name,
                    "no_package_list is set, ignoring inline packages"
                );
            }
        }
        return Ok(());
    }

    for arch in distro.architectures.values_mut() {
        let path = package_list_path(unit_dir, &name, &arch.name);
        if !stat(&path)?.is_some_and(|meta| meta.is_file()) {
            continue;
        }
        if arch.packages.is_some() {
            tracing::warn!(
                distribution = %name,
                arch = %arch.name,
                file = %path.display(),
                "package list file overrides inline packages"
            );
        }
        arch.packages = Some(PackageIndex::from_file(&path)?);
    }
    Ok(())
}
