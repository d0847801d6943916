//! Registry configuration
//!
//! Stored in `~/.config/distreg/config.yaml`:
//!
//! ```yaml
//! distributionsDir: /usr/share/distreg/distributions
//! allowFile: /etc/distreg/allow.json
//! search:
//!   caseSensitive: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DistroError, Result};
use crate::package::SearchPolicy;

/// Registry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the distribution definitions
    #[serde(default = "default_distributions_dir")]
    pub distributions_dir: PathBuf,

    /// Allow list for restricted distributions
    #[serde(default)]
    pub allow_file: Option<PathBuf>,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Package search settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Match package names case-sensitively (default: false)
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_distributions_dir() -> PathBuf {
    PathBuf::from("distributions")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distributions_dir: default_distributions_dir(),
            allow_file: None,
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DistroError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|e| DistroError::Config {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Default configuration path, when the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("distreg").join("config.yaml"))
    }

    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy::from_case_sensitive(self.search.case_sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.distributions_dir, PathBuf::from("distributions"));
        assert!(config.allow_file.is_none());
        assert_eq!(config.search_policy(), SearchPolicy::CaseInsensitive);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_yaml::from_str("allowFile: /etc/distreg/allow.json\n").unwrap();
        assert_eq!(config.distributions_dir, PathBuf::from("distributions"));
        assert_eq!(config.allow_file, Some(PathBuf::from("/etc/distreg/allow.json")));
    }

    #[test]
    fn test_load_from() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
distributionsDir: /srv/distributions
search:
  caseSensitive: true
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.distributions_dir, PathBuf::from("/srv/distributions"));
        assert_eq!(config.search_policy(), SearchPolicy::CaseSensitive);
    }

    #[test]
    fn test_load_from_invalid() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "search: 42\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, DistroError::Config { .. }));

        let err = Config::load_from(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, DistroError::Io { .. }));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = Config {
            allow_file: Some(PathBuf::from("allow.json")),
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("distributionsDir"));

        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
