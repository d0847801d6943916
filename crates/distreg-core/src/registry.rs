//! The distribution registry and its entitlement-filtered views

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::distribution::DistributionFile;
use crate::error::{DistroError, Result};

/// Every known distribution, immutable once built
///
/// Distributions are shared behind `Arc`; views and clones never copy
/// their package indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistroRegistry {
    distros: BTreeMap<String, Arc<DistributionFile>>,
    /// Names whose content requires entitlement
    entitled_only: BTreeSet<String>,
}

impl DistroRegistry {
    pub fn new(distros: BTreeMap<String, Arc<DistributionFile>>) -> Self {
        let entitled_only = distros
            .iter()
            .filter(|(_, d)| d.requires_entitlement())
            .map(|(name, _)| name.clone())
            .collect();
        Self {
            distros,
            entitled_only,
        }
    }

    /// Build from distributions already in memory, keyed by their own names
    pub fn from_distributions(distros: impl IntoIterator<Item = DistributionFile>) -> Self {
        Self::new(
            distros
                .into_iter()
                .map(|d| (d.name().to_string(), Arc::new(d)))
                .collect(),
        )
    }

    /// The distributions visible to a caller of the given entitlement
    pub fn available(&self, entitled: bool) -> RegistryView<'_> {
        RegistryView {
            registry: self,
            entitled,
        }
    }

    /// Lookup ignoring entitlement, for operator tooling
    pub fn get_unfiltered(&self, name: &str) -> Result<&Arc<DistributionFile>> {
        self.distros
            .get(name)
            .ok_or_else(|| DistroError::DistributionNotFound {
                name: name.to_string(),
            })
    }

    pub fn requires_entitlement(&self, name: &str) -> bool {
        self.entitled_only.contains(name)
    }

    pub fn len(&self) -> usize {
        self.distros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distros.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.distros.keys().map(String::as_str)
    }
}

/// Entitlement-filtered view over a [`DistroRegistry`]
///
/// Hidden distributions behave exactly like unknown ones.
#[derive(Debug, Clone, Copy)]
pub struct RegistryView<'a> {
    registry: &'a DistroRegistry,
    entitled: bool,
}

impl<'a> RegistryView<'a> {
    pub fn is_entitled(&self) -> bool {
        self.entitled
    }

    fn visible(&self, name: &str) -> bool {
        self.entitled || !self.registry.requires_entitlement(name)
    }

    /// Exact lookup within the view
    pub fn get(&self, name: &str) -> Result<&'a Arc<DistributionFile>> {
        let registry = self.registry;
        match registry.distros.get(name) {
            Some(d) if self.visible(name) => Ok(d),
            _ => Err(DistroError::DistributionNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Visible distributions, in name order
    pub fn iter(self) -> impl Iterator<Item = &'a Arc<DistributionFile>> {
        let registry = self.registry;
        registry
            .distros
            .iter()
            .filter(move |(name, _)| self.visible(name))
            .map(|(_, d)| d)
    }

    pub fn names(self) -> impl Iterator<Item = &'a str> {
        self.iter().map(|d| d.name())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::Architecture;
    use crate::repository::RepositoryEntry;

    fn distro(name: &str, rhsm: bool) -> DistributionFile {
        let mut repo = RepositoryEntry::with_baseurl("baseos", format!("https://cdn.example.com/{}/baseos", name));
        repo.rhsm = rhsm;
        DistributionFile::new(name, name).with_architecture(Architecture {
            repositories: vec![repo],
            ..Architecture::new("x86_64")
        })
    }

    fn sample_registry() -> DistroRegistry {
        DistroRegistry::from_distributions([
            distro("centos-9", false),
            distro("rhel-90", true),
            distro("fedora-39", false),
        ])
    }

    #[test]
    fn test_entitled_view_sees_everything() {
        let registry = sample_registry();
        let view = registry.available(true);

        assert!(view.is_entitled());
        assert_eq!(view.len(), 3);
        assert_eq!(view.names().collect::<Vec<_>>(), vec!["centos-9", "fedora-39", "rhel-90"]);
        assert!(view.get("rhel-90").is_ok());
    }

    #[test]
    fn test_unentitled_view_hides_entitled_content() {
        let registry = sample_registry();
        let view = registry.available(false);

        assert_eq!(view.names().collect::<Vec<_>>(), vec!["centos-9", "fedora-39"]);
        assert!(view.get("centos-9").is_ok());

        let err = view.get("rhel-90").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), view.get("rhel-90").unwrap_err().to_string());
    }

    #[test]
    fn test_hidden_equals_unknown() {
        let registry = sample_registry();
        let view = registry.available(false);

        let hidden = view.get("rhel-90").unwrap_err();
        let unknown = view.get("rhel-91").unwrap_err();
        assert!(matches!(hidden, DistroError::DistributionNotFound { .. }));
        assert!(matches!(unknown, DistroError::DistributionNotFound { .. }));
    }

    #[test]
    fn test_views_share_distributions() {
        let registry = sample_registry();
        let a = registry.available(true).get("centos-9").unwrap();
        let b = registry.available(false).get("centos-9").unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_empty_registry() {
        let registry = DistroRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.available(true).is_empty());
        assert!(registry.available(false).get("anything").unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_unfiltered() {
        let registry = sample_registry();
        assert!(registry.get_unfiltered("rhel-90").is_ok());
        assert!(registry.requires_entitlement("rhel-90"));
        assert!(!registry.requires_entitlement("centos-9"));
        assert!(registry.get_unfiltered("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DistroRegistry>();
        assert_send_sync::<RegistryView<'static>>();
    }
}
