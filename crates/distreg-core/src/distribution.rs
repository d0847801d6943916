//! Distribution definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::architecture::{self, Architecture, CANONICAL_ARCHITECTURES};
use crate::error::{DistroError, Result, ValidationError};

/// One operating system release, as loaded from its definition file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionFile {
    /// Platform identifier passed to the depsolver (e.g. `platform:el9`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_platform_id: Option<String>,

    pub distribution: DistributionItem,

    /// Architectures keyed by canonical name, in definition order
    #[serde(default)]
    pub architectures: IndexMap<String, Architecture>,
}

/// Distribution metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionItem {
    /// Unique key of the distribution (e.g. `rhel-90`)
    pub name: String,

    /// Human readable name
    #[serde(default)]
    pub description: String,

    /// Building requires the organization to be allow-listed
    #[serde(default)]
    pub restricted_access: bool,

    /// The distribution intentionally ships no package list
    #[serde(default)]
    pub no_package_list: bool,
}

impl DistributionFile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            module_platform_id: None,
            distribution: DistributionItem {
                name: name.into(),
                description: description.into(),
                restricted_access: false,
                no_package_list: false,
            },
            architectures: IndexMap::new(),
        }
    }

    /// Add an architecture, keyed by its name
    pub fn with_architecture(mut self, arch: Architecture) -> Self {
        self.architectures.insert(arch.name.clone(), arch);
        self
    }

    pub fn name(&self) -> &str {
        &self.distribution.name
    }

    pub fn description(&self) -> &str {
        &self.distribution.description
    }

    /// Look up an architecture by exact name
    pub fn architecture(&self, name: &str) -> Result<&Architecture> {
        self.architectures
            .get(name)
            .ok_or_else(|| DistroError::ArchitectureNotSupported {
                name: name.to_string(),
            })
    }

    /// Whether building requires the organization to be allow-listed
    pub fn is_restricted(&self) -> bool {
        self.distribution.restricted_access
    }

    /// Whether any content of this distribution requires entitlement
    pub fn requires_entitlement(&self) -> bool {
        self.architectures.values().any(Architecture::requires_entitlement)
    }

    pub fn architecture_names(&self) -> impl Iterator<Item = &str> {
        self.architectures.keys().map(String::as_str)
    }

    /// Validate architecture keys, then each architecture in order
    ///
    /// The first failure is returned; nothing after it is checked.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        for (key, arch) in &self.architectures {
            if !architecture::is_canonical(key) {
                return Err(ValidationError::UnknownArchitecture {
                    name: key.clone(),
                    expected: CANONICAL_ARCHITECTURES.join(", "),
                });
            }
            arch.validate()?;
        }
        Ok(())
    }

    /// Record map keys as architecture names after deserializing
    pub(crate) fn name_architectures(&mut self) {
        for (key, arch) in self.architectures.iter_mut() {
            arch.name = key.clone();
        }
    }
}
