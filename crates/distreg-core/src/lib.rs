//! distreg core - the distribution registry behind image builds
//!
//! This crate loads declarative distribution definitions from a directory
//! and answers entitlement-aware lookups:
//! - `DistributionFile`: one OS release and its architectures
//! - `Architecture`: image types, repository entries and package index
//! - `DistroRegistry`: every loaded distribution, with filtered views
//! - `SharedRegistry`: a registry handle that can be reloaded atomically
//! - `access::authorize`: view lookup plus the restricted-access check
//!
//! ```rust,no_run
//! use distreg_core::load_distro_registry;
//!
//! # fn example() -> distreg_core::Result<()> {
//! let registry = load_distro_registry("distributions")?;
//! let centos = registry.available(false).get("centos-9")?;
//! let x86 = centos.architecture("x86_64")?;
//! for pkg in x86.find_packages("vim") {
//!     println!("{}: {}", pkg.name, pkg.summary);
//! }
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod allow_list;
pub mod architecture;
pub mod config;
pub mod distribution;
pub mod error;
pub mod loader;
pub mod package;
pub mod registry;
pub mod repository;
pub mod shared;

pub use access::{AccessError, authorize};
pub use allow_list::{AllowList, AllowListError, FileAllowList};
pub use architecture::{Architecture, CANONICAL_ARCHITECTURES};
pub use config::{Config, SearchConfig};
pub use distribution::{DistributionFile, DistributionItem};
pub use error::{DistroError, Result, ValidationError};
pub use loader::{load_distro_registry, read_distribution};
pub use package::{Package, PackageIndex, SearchPolicy};
pub use registry::{DistroRegistry, RegistryView};
pub use repository::{RepositoryEntry, RepositorySource};
pub use shared::SharedRegistry;
