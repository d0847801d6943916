//! Package index and name search

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{DistroError, Result};

/// A package available for an architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

impl Package {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }
}

/// How package names are compared against a search query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchPolicy {
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

impl SearchPolicy {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            SearchPolicy::CaseSensitive
        } else {
            SearchPolicy::CaseInsensitive
        }
    }

    fn matches(self, name: &str, query: &Query<'_>) -> bool {
        match self {
            SearchPolicy::CaseSensitive => name.contains(query.raw),
            SearchPolicy::CaseInsensitive => match &query.folded {
                None => contains_ignore_ascii_case(name, query.raw),
                Some(folded) => name.to_lowercase().contains(folded.as_str()),
            },
        }
    }
}

/// Search query, folded once up front when it is not plain ASCII
struct Query<'a> {
    raw: &'a str,
    folded: Option<String>,
}

impl<'a> Query<'a> {
    fn new(raw: &'a str, policy: SearchPolicy) -> Self {
        let folded = match policy {
            SearchPolicy::CaseInsensitive if !raw.is_ascii() => Some(raw.to_lowercase()),
            _ => None,
        };
        Self { raw, folded }
    }
}

/// Substring test without allocating; non-ASCII bytes must match exactly
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// Packages shipped for one architecture, in index order
///
/// Names are unique within a loaded index; the loader rejects duplicates.
/// The index can be large, so it is only ever handed out by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageIndex {
    packages: Vec<Package>,
}

impl PackageIndex {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    /// Read a package list document (a JSON array of `{name, summary}`)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DistroError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| DistroError::parse(path, e))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    /// Look up a package by exact name
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// First name that appears more than once, in index order
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.packages.len());
        self.packages
            .iter()
            .map(|p| p.name.as_str())
            .find(|name| !seen.insert(*name))
    }

    /// All packages whose name contains `query`, in index order
    pub fn search(&self, query: &str, policy: SearchPolicy) -> Vec<&Package> {
        let query = Query::new(query, policy);
        self.packages
            .iter()
            .filter(|p| policy.matches(&p.name, &query))
            .collect()
    }
}

impl FromIterator<Package> for PackageIndex {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
