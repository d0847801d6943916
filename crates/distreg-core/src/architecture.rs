//! CPU architectures of a distribution

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::package::{Package, PackageIndex, SearchPolicy};
use crate::repository::RepositoryEntry;

/// Canonical architecture names accepted as keys in a definition
pub const CANONICAL_ARCHITECTURES: &[&str] = &["x86_64", "aarch64", "ppc64le", "s390x"];

pub fn is_canonical(name: &str) -> bool {
    CANONICAL_ARCHITECTURES.contains(&name)
}

/// Image types, package sources and packages of one architecture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    /// Canonical name, taken from the key in the definition
    #[serde(skip)]
    pub name: String,

    /// Image types buildable for this architecture
    #[serde(default)]
    pub image_types: Vec<String>,

    /// Package sources, in priority order
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,

    /// Package index; absent when the distribution ships no package list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<PackageIndex>,
}

impl Architecture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate every repository entry, then package name uniqueness
    ///
    /// Stops at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.repositories.iter().try_for_each(RepositoryEntry::validate)?;

        match self.packages.as_ref().and_then(PackageIndex::first_duplicate) {
            Some(name) => Err(ValidationError::DuplicatePackage {
                architecture: self.name.clone(),
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Case-insensitive package name search
    pub fn find_packages(&self, query: &str) -> Vec<&Package> {
        self.find_packages_with(query, SearchPolicy::default())
    }

    /// Package name search with an explicit case policy
    ///
    /// Returns matches in index order, and nothing when no index is loaded.
    pub fn find_packages_with(&self, query: &str, policy: SearchPolicy) -> Vec<&Package> {
        match &self.packages {
            Some(index) => index.search(query, policy),
            None => Vec::new(),
        }
    }

    pub fn supports_image_type(&self, image_type: &str) -> bool {
        self.image_types.iter().any(|t| t == image_type)
    }

    /// Repositories usable when building `image_type`
    pub fn repositories_for<'a>(&'a self, image_type: &'a str) -> impl Iterator<Item = &'a RepositoryEntry> {
        self.repositories.iter().filter(move |r| r.applies_to(image_type))
    }

    /// Whether any source requires entitlement
    pub fn requires_entitlement(&self) -> bool {
        self.repositories.iter().any(|r| r.rhsm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arch_with_repos(repositories: Vec<RepositoryEntry>) -> Architecture {
        Architecture {
            repositories,
            ..Architecture::new("x86_64")
        }
    }

    #[test]
    fn test_validate_good() {
        let arch = arch_with_repos(vec![
            RepositoryEntry {
                baseurl: Some("http://example.com/repo1".to_string()),
                ..RepositoryEntry::default()
            },
            RepositoryEntry {
                metalink: Some("http://example.com/repo2".to_string()),
                ..RepositoryEntry::default()
            },
        ]);
        assert_eq!(arch.validate(), Ok(()));
    }

    #[test]
    fn test_validate_multiple_sources() {
        let arch = arch_with_repos(vec![RepositoryEntry {
            baseurl: Some("http://example.com/repo1".to_string()),
            metalink: Some("http://example.com/repo2".to_string()),
            ..RepositoryEntry::default()
        }]);
        assert!(matches!(arch.validate(), Err(ValidationError::RepoSource { .. })));
    }

    #[test]
    fn test_validate_no_source() {
        let arch = arch_with_repos(vec![RepositoryEntry::default()]);
        assert!(matches!(arch.validate(), Err(ValidationError::RepoSource { .. })));
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let arch = arch_with_repos(vec![
            RepositoryEntry::with_baseurl("ok", "http://example.com/ok"),
            RepositoryEntry {
                id: Some("first".to_string()),
                ..RepositoryEntry::default()
            },
            RepositoryEntry {
                id: Some("second".to_string()),
                ..RepositoryEntry::default()
            },
        ]);
        assert_eq!(
            arch.validate(),
            Err(ValidationError::RepoSource {
                repository: "first".to_string()
            })
        );
    }

    #[test]
    fn test_validate_duplicate_package() {
        let arch = Architecture {
            packages: Some(PackageIndex::new(vec![
                Package::new("vim-minimal", "A minimal version of the VIM editor"),
                Package::new("bash", "The GNU Bourne Again shell"),
                Package::new("vim-minimal", "Listed again"),
            ])),
            ..arch_with_repos(vec![RepositoryEntry::with_baseurl("baseos", "http://mirror.example.com/BaseOS")])
        };
        assert_eq!(
            arch.validate(),
            Err(ValidationError::DuplicatePackage {
                architecture: arch.name.clone(),
                name: "vim-minimal".to_string()
            })
        );
    }

    #[test]
    fn test_find_packages_without_index() {
        let arch = Architecture::new("x86_64");
        assert!(arch.find_packages("vim").is_empty());
        assert!(arch.find_packages_with("vim", SearchPolicy::CaseSensitive).is_empty());
        assert!(arch.find_packages("").is_empty());
    }

    #[test]
    fn test_find_packages_with_policies() {
        let arch = Architecture {
            packages: Some(PackageIndex::new(vec![
                Package::new("vim-minimal", "A minimal version of the VIM editor"),
                Package::new("vim-X11", "The VIM version of the vi editor for the X Window System - GVim"),
                Package::new("bash", "The GNU Bourne Again shell"),
            ])),
            ..Architecture::new("x86_64")
        };

        let found: Vec<_> = arch.find_packages("VIM").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(found, vec!["vim-minimal", "vim-X11"]);

        assert!(arch.find_packages_with("VIM", SearchPolicy::CaseSensitive).is_empty());
    }

    #[test]
    fn test_repositories_for_image_type() {
        let mut gcp_only = RepositoryEntry::with_baseurl("google-compute-engine", "https://packages.example.com/gce");
        gcp_only.image_type_tags = vec!["gcp".to_string()];

        let arch = Architecture {
            image_types: vec!["aws".to_string(), "gcp".to_string()],
            ..arch_with_repos(vec![
                RepositoryEntry::with_baseurl("baseos", "http://mirror.example.com/BaseOS"),
                gcp_only,
            ])
        };

        assert!(arch.supports_image_type("gcp"));
        assert!(!arch.supports_image_type("wsl"));
        assert_eq!(arch.repositories_for("aws").count(), 1);
        assert_eq!(arch.repositories_for("gcp").count(), 2);
    }

    #[test]
    fn test_requires_entitlement() {
        let mut arch = arch_with_repos(vec![RepositoryEntry::with_baseurl("baseos", "http://mirror.example.com/BaseOS")]);
        assert!(!arch.requires_entitlement());

        arch.repositories[0].rhsm = true;
        assert!(arch.requires_entitlement());
    }

    #[test]
    fn test_canonical_names() {
        assert!(is_canonical("x86_64"));
        assert!(is_canonical("aarch64"));
        assert!(!is_canonical("amd64"));
        assert!(!is_canonical("X86_64"));
    }
}
