//! Access checks for request handlers
//!
//! Combines the entitlement-filtered lookup with the allow list check
//! for restricted distributions.

use std::sync::Arc;
use thiserror::Error;

use crate::allow_list::{AllowList, AllowListError};
use crate::distribution::DistributionFile;
use crate::registry::RegistryView;

#[derive(Debug, Error)]
pub enum AccessError {
    /// Unknown, or hidden from the caller's entitlement
    #[error("distribution not found: {name}")]
    NotFound { name: String },

    #[error("this account's organization is not authorized to build {name} images")]
    Forbidden { name: String },

    #[error(transparent)]
    AllowList(#[from] AllowListError),
}

impl AccessError {
    /// Caller mistakes, as opposed to failures on our side
    pub fn is_client_error(&self) -> bool {
        matches!(self, AccessError::NotFound { .. } | AccessError::Forbidden { .. })
    }
}

/// Fetch `name` from the caller's view and check the organization may use it
///
/// The allow list is only consulted for restricted distributions.
pub fn authorize<'a>(
    view: RegistryView<'a>,
    allow_list: &dyn AllowList,
    org_id: &str,
    name: &str,
) -> Result<&'a Arc<DistributionFile>, AccessError> {
    let distro = view.get(name).map_err(|_| AccessError::NotFound {
        name: name.to_string(),
    })?;

    if distro.is_restricted() && !allow_list.is_allowed(org_id, distro.name())? {
        tracing::debug!(org_id, distribution = name, "organization not allow-listed");
        return Err(AccessError::Forbidden {
            name: distro.name().to_string(),
        });
    }

    Ok(distro)
}
