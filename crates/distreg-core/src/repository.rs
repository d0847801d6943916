//! Repository entries - package sources for an architecture

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One package source of an architecture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Identifier, used for reference and in error messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Base URL of the repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseurl: Option<String>,

    /// Metalink URL resolving to mirrors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metalink: Option<String>,

    /// Content requires a subscription (entitlement)
    #[serde(default)]
    pub rhsm: bool,

    /// Restrict this source to these image types (empty means all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_type_tags: Vec<String>,

    /// Armored GPG key(s) used to verify packages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpgkey: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_gpg: Option<bool>,
}

/// The populated source of a valid repository entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositorySource<'a> {
    BaseUrl(&'a str),
    Metalink(&'a str),
}

impl RepositorySource<'_> {
    pub fn url(&self) -> &str {
        match self {
            RepositorySource::BaseUrl(url) | RepositorySource::Metalink(url) => url,
        }
    }
}

impl RepositoryEntry {
    /// Entry sourced from a base URL
    pub fn with_baseurl(id: impl Into<String>, baseurl: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            baseurl: Some(baseurl.into()),
            ..Self::default()
        }
    }

    /// Entry sourced from a metalink
    pub fn with_metalink(id: impl Into<String>, metalink: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            metalink: Some(metalink.into()),
            ..Self::default()
        }
    }

    /// Check that exactly one of `baseurl` and `metalink` is set
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.source().map(|_| ())
    }

    /// The single configured source, or a `RepoSource` error
    pub fn source(&self) -> Result<RepositorySource<'_>, ValidationError> {
        match (&self.baseurl, &self.metalink) {
            (Some(url), None) => Ok(RepositorySource::BaseUrl(url)),
            (None, Some(url)) => Ok(RepositorySource::Metalink(url)),
            _ => Err(ValidationError::RepoSource {
                repository: self.display_id().to_string(),
            }),
        }
    }

    /// Whether an image type may use this source
    pub fn applies_to(&self, image_type: &str) -> bool {
        self.image_type_tags.is_empty() || self.image_type_tags.iter().any(|t| t == image_type)
    }

    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("<unnamed>")
    }
}
