//! Reloadable registry handle for long-running hosts

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::Result;
use crate::loader::load_distro_registry;
use crate::registry::DistroRegistry;

/// A registry that can be replaced while readers keep using snapshots
///
/// Readers call [`SharedRegistry::current`] once per request and work on that
/// snapshot. A reload publishes a complete new registry or nothing at all.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<ArcSwap<DistroRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: DistroRegistry) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(registry)),
        }
    }

    /// Load the initial registry from `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(load_distro_registry(dir)?))
    }

    /// Snapshot of the registry currently being served
    pub fn current(&self) -> Arc<DistroRegistry> {
        self.inner.load_full()
    }

    /// Reload from `dir`, swapping only if the new load succeeds
    ///
    /// On failure the previous registry stays in place and the error is
    /// returned.
    pub fn reload(&self, dir: impl AsRef<Path>) -> Result<Arc<DistroRegistry>> {
        let dir = dir.as_ref();
        match load_distro_registry(dir) {
            Ok(registry) => {
                let registry = Arc::new(registry);
                self.inner.store(Arc::clone(&registry));
                tracing::info!(
                    dir = %dir.display(),
                    distributions = registry.len(),
                    "distribution registry reloaded"
                );
                Ok(registry)
            }
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "reload failed, keeping previous registry"
                );
                Err(e)
            }
        }
    }
}

impl From<DistroRegistry> for SharedRegistry {
    fn from(registry: DistroRegistry) -> Self {
        Self::new(registry)
    }
}
