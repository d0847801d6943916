//! Core error types

use std::path::PathBuf;
use thiserror::Error;

/// Structural problems found while validating a definition
///
/// Validation is first-failure-wins: the first offending item is reported
/// and nothing after it is inspected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A repository entry has both or neither of `baseurl` and `metalink`
    #[error("repository {repository}: exactly one of baseurl or metalink must be set")]
    RepoSource { repository: String },

    /// Architecture key is not one of the canonical names
    #[error("unknown architecture '{name}' (expected one of: {expected})")]
    UnknownArchitecture { name: String, expected: String },

    /// Name recorded in the definition does not match its unit directory
    #[error("distribution name '{found}' does not match its directory '{expected}'")]
    NameMismatch { expected: String, found: String },

    /// Package index lists the same name twice
    #[error("architecture {architecture}: package '{name}' is listed more than once")]
    DuplicatePackage { architecture: String, name: String },
}

/// Registry errors
#[derive(Error, Debug)]
pub enum DistroError {
    // ============ Lookup Errors ============
    #[error("distribution not found: {name}")]
    DistributionNotFound { name: String },

    #[error("architecture not supported: {name}")]
    ArchitectureNotSupported { name: String },

    // ============ Definition Errors ============
    #[error("invalid distribution {distribution}: {source}")]
    InvalidDistribution {
        distribution: String,
        #[source]
        source: ValidationError,
    },

    #[error("definitions directory not found: {}", path.display())]
    DefinitionsDirNotFound { path: PathBuf },

    #[error("distribution {name} has more than one definition file")]
    DuplicateDefinition { name: String },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    // ============ IO Errors ============
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DistroError {
    /// Unknown distribution, or one hidden from the caller's view
    pub fn is_not_found(&self) -> bool {
        matches!(self, DistroError::DistributionNotFound { .. })
    }

    /// A repository entry with zero or two sources aborted the load
    pub fn is_repo_source(&self) -> bool {
        matches!(
            self,
            DistroError::InvalidDistribution {
                source: ValidationError::RepoSource { .. },
                ..
            }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DistroError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        DistroError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DistroError>;
