//! Organization allow lists for restricted distributions

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllowListError {
    #[error("failed to read allow list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse allow list {path}: {message}")]
    Parse { path: String, message: String },

    #[error("allow list backend error: {0}")]
    Backend(String),
}

/// Decides which organizations may build a restricted distribution
///
/// Only consulted for distributions flagged `restricted_access`.
pub trait AllowList: Send + Sync {
    fn is_allowed(&self, org_id: &str, distribution: &str) -> Result<bool, AllowListError>;
}

/// Allow list backed by a JSON file mapping org id to distribution names
///
/// ```json
/// { "000000": ["centos-8", "rhel-90"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileAllowList {
    orgs: HashMap<String, HashSet<String>>,
}

impl FileAllowList {
    /// Load from `path`; no path means nobody is allowed
    pub fn load(path: Option<&Path>) -> Result<Self, AllowListError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, AllowListError> {
        let content = std::fs::read_to_string(path).map_err(|source| AllowListError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| AllowListError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn allow(&mut self, org_id: impl Into<String>, distribution: impl Into<String>) {
        self.orgs
            .entry(org_id.into())
            .or_default()
            .insert(distribution.into());
    }

    pub fn is_empty(&self) -> bool {
        self.orgs.is_empty()
    }
}

impl AllowList for FileAllowList {
    fn is_allowed(&self, org_id: &str, distribution: &str) -> Result<bool, AllowListError> {
        Ok(self
            .orgs
            .get(org_id)
            .is_some_and(|distros| distros.contains(distribution)))
    }
}
