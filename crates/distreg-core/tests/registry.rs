//! Integration tests against the shared fixture tree

use distreg_core::{
    Architecture, DistroError, FileAllowList, Package, RepositoryEntry, SearchPolicy, SharedRegistry,
    ValidationError, authorize, load_distro_registry, read_distribution,
};

fn distributions() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/distributions")
}

fn invalid(name: &str) -> String {
    format!("{}/../../fixtures/invalid/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn vim_packages() -> Vec<Package> {
    vec![
        Package::new("vim-minimal", "A minimal version of the VIM editor"),
        Package::new("vim-common", "The common files needed by any version of the VIM editor"),
        Package::new("vim-enhanced", "A version of the VIM editor which includes recent enhancements"),
        Package::new("vim-X11", "The VIM version of the vi editor for the X Window System - GVim"),
        Package::new("vim-filesystem", "VIM filesystem layout"),
    ]
}

#[test]
fn test_distribution_architecture() {
    let registry = load_distro_registry(distributions()).unwrap();
    let d = registry.available(false).get("centos-8").unwrap();

    let arch = d.architecture("x86_64").unwrap();
    // packages are checked separately
    let arch = Architecture {
        packages: None,
        ..arch.clone()
    };

    let mut gce = RepositoryEntry::with_baseurl(
        "google-compute-engine",
        "https://packages.cloud.google.com/yum/repos/google-compute-engine-el8-x86_64-stable",
    );
    gce.image_type_tags = vec!["gcp".to_string()];
    let mut sdk = RepositoryEntry::with_baseurl(
        "google-cloud-sdk",
        "https://packages.cloud.google.com/yum/repos/cloud-sdk-el8-x86_64",
    );
    sdk.image_type_tags = vec!["gcp".to_string()];

    let expected = Architecture {
        image_types: [
            "aws", "gcp", "azure", "ami", "vhd", "guest-image", "image-installer", "oci", "vsphere",
            "vsphere-ova", "wsl",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        repositories: vec![
            RepositoryEntry::with_baseurl("baseos", "http://mirror.centos.org/centos/8-stream/BaseOS/x86_64/os/"),
            RepositoryEntry::with_baseurl(
                "appstream",
                "http://mirror.centos.org/centos/8-stream/AppStream/x86_64/os/",
            ),
            RepositoryEntry::with_baseurl("extras", "http://mirror.centos.org/centos/8-stream/extras/x86_64/os/"),
            gce,
            sdk,
        ],
        ..Architecture::new("x86_64")
    };
    assert_eq!(arch, expected);

    let err = d.architecture("unsupported").unwrap_err();
    assert!(matches!(err, DistroError::ArchitectureNotSupported { .. }));
}

#[test]
fn test_find_packages() {
    let registry = load_distro_registry(distributions()).unwrap();

    let d = registry.available(false).get("centos-8").unwrap();
    let found: Vec<Package> = d
        .architecture("x86_64")
        .unwrap()
        .find_packages("vim")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(found, vim_packages());

    let d = registry.available(true).get("rhel-84").unwrap();
    let found: Vec<Package> = d
        .architecture("x86_64")
        .unwrap()
        .find_packages("vim")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(found, vim_packages());
}

#[test]
fn test_find_packages_case_policies() {
    let registry = load_distro_registry(distributions()).unwrap();
    let arch = registry
        .available(false)
        .get("centos-8")
        .unwrap()
        .architecture("x86_64")
        .unwrap();

    let insensitive: Vec<_> = arch
        .find_packages_with("x11", SearchPolicy::CaseInsensitive)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(insensitive, vec!["vim-X11", "libX11"]);

    assert!(arch.find_packages_with("x11", SearchPolicy::CaseSensitive).is_empty());
}

#[test]
fn test_no_package_list_distro() {
    let registry = load_distro_registry(distributions()).unwrap();
    let d = registry.available(true).get("no-packages-distro").unwrap();

    let arch = d.architecture("x86_64").unwrap();
    assert!(arch.find_packages("vim").is_empty());
    assert!(arch.find_packages("").is_empty());
}

#[test]
fn test_invalid_distribution() {
    let err = read_distribution(distributions(), "none").unwrap_err();
    assert!(matches!(err, DistroError::DistributionNotFound { .. }));
}

#[test]
fn test_is_restricted() {
    // no restricted_access field
    let d = read_distribution(distributions(), "rhel-90").unwrap();
    assert!(!d.is_restricted());

    // restricted_access: false
    let d = read_distribution(distributions(), "centos-9").unwrap();
    assert!(!d.is_restricted());

    // restricted_access: true
    let d = read_distribution(distributions(), "centos-8").unwrap();
    assert!(d.is_restricted());
}

#[test]
fn test_entitlement_views() {
    let registry = load_distro_registry(distributions()).unwrap();

    let all: Vec<_> = registry.available(true).names().collect();
    assert_eq!(
        all,
        vec!["centos-8", "centos-9", "fedora-39", "no-packages-distro", "rhel-84", "rhel-90"]
    );

    let unentitled = registry.available(false);
    let visible: Vec<_> = unentitled.names().collect();
    assert_eq!(visible, vec!["centos-8", "centos-9", "fedora-39", "no-packages-distro"]);
    for d in unentitled.iter() {
        assert!(!d.requires_entitlement());
    }
    assert!(unentitled.get("rhel-90").unwrap_err().is_not_found());
    assert!(unentitled.get("rhel-84").unwrap_err().is_not_found());
}

#[test]
fn test_yaml_and_metalink_definition() {
    let d = read_distribution(distributions(), "fedora-39").unwrap();
    let arch = d.architecture("x86_64").unwrap();
    assert!(arch.repositories.iter().all(|r| r.metalink.is_some() && r.baseurl.is_none()));
    assert_eq!(arch.find_packages("vim").len(), 2);
}

#[test]
fn test_load_is_deterministic() {
    let first = load_distro_registry(distributions()).unwrap();
    let second = load_distro_registry(distributions()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_fixtures() {
    let err = load_distro_registry(invalid("multiple-sources")).unwrap_err();
    assert!(err.is_repo_source());

    let err = load_distro_registry(invalid("no-source")).unwrap_err();
    assert!(err.is_repo_source());

    let err = load_distro_registry(invalid("unknown-arch")).unwrap_err();
    assert!(matches!(
        err,
        DistroError::InvalidDistribution {
            source: ValidationError::UnknownArchitecture { .. },
            ..
        }
    ));

    let err = load_distro_registry(invalid("malformed")).unwrap_err();
    assert!(matches!(err, DistroError::Parse { .. }));
}

#[test]
fn test_authorize_with_fixture_allow_list() {
    let registry = load_distro_registry(distributions()).unwrap();
    let allow_list = FileAllowList::load_from(std::path::Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/allow.json"
    )))
    .unwrap();

    assert!(authorize(registry.available(false), &allow_list, "000000", "centos-8").is_ok());
    assert!(authorize(registry.available(false), &allow_list, "424242", "centos-8").is_err());
    assert!(authorize(registry.available(false), &allow_list, "424242", "centos-9").is_ok());
}

#[test]
fn test_shared_registry_failed_reload() {
    let shared = SharedRegistry::load(distributions()).unwrap();
    assert!(shared.reload(invalid("no-source")).is_err());
    assert_eq!(shared.current().len(), 6);
}
