//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use distreg_core::{AccessError, AllowListError, DistroError};
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// A definition failed to parse or validate
    #[error("Validation failed: {message}")]
    #[diagnostic(code(distreg::cli::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Unknown distribution or architecture
    #[error("{message}")]
    #[diagnostic(code(distreg::cli::not_found))]
    NotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Organization may not build a restricted distribution
    #[error("{message}")]
    #[diagnostic(code(distreg::cli::forbidden))]
    Forbidden { message: String },

    /// Lint found problems; the details were already printed
    #[error("Lint failed with {errors} error(s)")]
    #[diagnostic(code(distreg::cli::lint))]
    LintFailed { errors: usize, exit_code: i32 },

    /// IO error (directory missing, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(distreg::cli::io))]
    Io { message: String },

    /// Configuration file could not be used
    #[error("Configuration error: {message}")]
    #[diagnostic(code(distreg::cli::config))]
    Config { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(distreg::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Forbidden { .. } => exit_codes::FORBIDDEN,
            CliError::LintFailed { exit_code, .. } => *exit_code,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Summarize a lint failure, keeping the exit code of its cause
    pub fn lint_failed(errors: usize, cause: &CliError) -> Self {
        Self::LintFailed {
            errors,
            exit_code: cause.exit_code(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<DistroError> for CliError {
    fn from(err: DistroError) -> Self {
        let message = err.to_string();
        match err {
            DistroError::DistributionNotFound { .. } => CliError::NotFound {
                message,
                help: Some("run 'distreg list' to see available distributions".to_string()),
            },
            DistroError::ArchitectureNotSupported { .. } => CliError::NotFound {
                message,
                help: None,
            },
            DistroError::InvalidDistribution { .. } => CliError::Validation {
                message,
                help: Some(
                    "repositories need exactly one of baseurl or metalink, architecture keys must be canonical, and package names unique"
                        .to_string(),
                ),
            },
            DistroError::DuplicateDefinition { .. } | DistroError::Parse { .. } => {
                CliError::Validation {
                    message,
                    help: None,
                }
            }
            DistroError::DefinitionsDirNotFound { .. } | DistroError::Io { .. } => {
                CliError::Io { message }
            }
            DistroError::Config { .. } => CliError::Config { message },
        }
    }
}

impl From<AllowListError> for CliError {
    fn from(err: AllowListError) -> Self {
        match err {
            AllowListError::Read { .. } => CliError::Io {
                message: err.to_string(),
            },
            AllowListError::Parse { .. } => CliError::Config {
                message: err.to_string(),
            },
            AllowListError::Backend(_) => CliError::internal(err.to_string()),
        }
    }
}

impl From<AccessError> for CliError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { .. } => CliError::NotFound {
                message: err.to_string(),
                help: None,
            },
            AccessError::Forbidden { .. } => CliError::Forbidden {
                message: err.to_string(),
            },
            AccessError::AllowList(inner) => inner.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("failed to encode JSON: {}", err))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use distreg_core::ValidationError;

    #[test]
    fn test_exit_codes() {
        let err: CliError = DistroError::DistributionNotFound {
            name: "none".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);

        let err: CliError = DistroError::InvalidDistribution {
            distribution: "bad".to_string(),
            source: ValidationError::RepoSource {
                repository: "baseos".to_string(),
            },
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_ERROR);

        let err: CliError = DistroError::DefinitionsDirNotFound {
            path: "missing".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::IO_ERROR);
    }

    #[test]
    fn test_lint_failed_keeps_exit_code() {
        let cause: CliError = DistroError::DefinitionsDirNotFound {
            path: "missing".into(),
        }
        .into();
        let err = CliError::lint_failed(1, &cause);
        assert_eq!(err.exit_code(), exit_codes::IO_ERROR);
        assert_eq!(err.to_string(), "Lint failed with 1 error(s)");
    }

    #[test]
    fn test_access_errors() {
        let err: CliError = AccessError::Forbidden {
            name: "centos-8".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::FORBIDDEN);
        assert!(err.to_string().contains("centos-8"));

        let err: CliError = AccessError::AllowList(AllowListError::Backend("down".to_string())).into();
        assert_eq!(err.exit_code(), exit_codes::ERROR);
    }
}
