//! Configuration for recon (recon.toml) parsing and validation
//!
//! Every section is optional: without `[[codebases]]` the codebases are
//! discovered from the directory layout, and without `[[tracked]]` the drift
//! command requires `--package` flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, ReconError, ReconResult};

/// How a tracked package name is matched against manifest entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
  /// Case-sensitive exact match on the package name
  #[default]
  Exact,
  /// Match any package whose name starts with the given string
  /// (used for SDK families with client/admin/server sub-packages)
  Prefix,
}

/// Configuration for recon
/// Searched in order: recon.toml, .recon.toml, .config/recon.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReconConfig {
  #[serde(default)]
  pub codebases: Vec<CodebaseConfig>,
  #[serde(default)]
  pub tracked: Vec<TrackedConfig>,
  #[serde(default)]
  pub locator: LocatorConfig,
}

/// One named codebase root under the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodebaseConfig {
  pub name: String,
  /// Path relative to the project root (absolute paths are accepted as-is)
  pub path: PathBuf,
}

/// One package (or package family) whose version is compared across codebases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedConfig {
  pub name: String,
  #[serde(default, rename = "match")]
  pub match_mode: MatchMode,
}

/// Manifest Locator tuning
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocatorConfig {
  /// Directory names to skip in addition to the built-in exclusion list
  #[serde(default)]
  pub exclude: Vec<String>,
}

impl ReconConfig {
  /// Find config file in search order: recon.toml, .recon.toml, .config/recon.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = [
      root.join("recon.toml"),
      root.join(".recon.toml"),
      root.join(".config").join("recon.toml"),
    ];
    candidates.into_iter().find(|p| p.is_file())
  }

  /// Check whether any config file exists under the project root
  pub fn exists(root: &Path) -> bool {
    Self::find_config_path(root).is_some()
  }

  /// Load and validate the config from the project root
  ///
  /// Errors if no config file exists; use [`ReconConfig::load_optional`] for
  /// commands where configuration is optional.
  pub fn load(root: &Path) -> ReconResult<Self> {
    let path = Self::find_config_path(root).ok_or_else(|| {
      ReconError::Config(ConfigError::Invalid {
        path: root.join("recon.toml"),
        reason: "file not found".to_string(),
      })
    })?;
    Self::load_from(&path)
  }

  /// Load the config if a config file exists, otherwise return None
  ///
  /// A config file that exists but fails to parse is still an error: silently
  /// ignoring a broken recon.toml would change which codebases get compared.
  pub fn load_optional(root: &Path) -> ReconResult<Option<Self>> {
    match Self::find_config_path(root) {
      Some(path) => Self::load_from(&path).map(Some),
      None => Ok(None),
    }
  }

  fn load_from(path: &Path) -> ReconResult<Self> {
    let content = fs::read_to_string(path).map_err(|e| {
      ReconError::Config(ConfigError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })?;

    let config: ReconConfig = toml_edit::de::from_str(&content).map_err(|e| {
      ReconError::Config(ConfigError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })?;

    config.validate(path)?;
    Ok(config)
  }

  fn validate(&self, path: &Path) -> ReconResult<()> {
    let mut seen = std::collections::HashSet::new();
    for codebase in &self.codebases {
      if codebase.name.is_empty() {
        return Err(ReconError::Config(ConfigError::Invalid {
          path: path.to_path_buf(),
          reason: "codebase with empty name".to_string(),
        }));
      }
      if !seen.insert(codebase.name.as_str()) {
        return Err(ReconError::Config(ConfigError::DuplicateCodebase {
          name: codebase.name.clone(),
        }));
      }
    }

    for tracked in &self.tracked {
      if tracked.name.is_empty() {
        return Err(ReconError::Config(ConfigError::Invalid {
          path: path.to_path_buf(),
          reason: "tracked package with empty name".to_string(),
        }));
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_full_config() {
    let config: ReconConfig = toml_edit::de::from_str(
      r#"
[[codebases]]
name = "backend"
path = "backend"

[[codebases]]
name = "frontend"
path = "web/frontend"

[[tracked]]
name = "firebase"
match = "prefix"

[[tracked]]
name = "typescript"

[locator]
exclude = ["third_party"]
"#,
    )
    .unwrap();

    assert_eq!(config.codebases.len(), 2);
    assert_eq!(config.codebases[1].path, PathBuf::from("web/frontend"));
    assert_eq!(config.tracked[0].match_mode, MatchMode::Prefix);
    assert_eq!(config.tracked[1].match_mode, MatchMode::Exact);
    assert_eq!(config.locator.exclude, vec!["third_party"]);
  }

  #[test]
  fn test_empty_config_is_valid() {
    let config: ReconConfig = toml_edit::de::from_str("").unwrap();
    assert!(config.codebases.is_empty());
    assert!(config.tracked.is_empty());
    assert!(config.locator.exclude.is_empty());
  }

  #[test]
  fn test_duplicate_codebase_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
      dir.path().join("recon.toml"),
      r#"
[[codebases]]
name = "api"
path = "api"

[[codebases]]
name = "api"
path = "api2"
"#,
    )
    .unwrap();

    let err = ReconConfig::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("Duplicate codebase"));
  }

  #[test]
  fn test_load_optional_without_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ReconConfig::load_optional(dir.path()).unwrap().is_none());
  }

  #[test]
  fn test_config_search_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".config")).unwrap();
    fs::write(dir.path().join(".config/recon.toml"), "").unwrap();
    fs::write(dir.path().join("recon.toml"), "").unwrap();

    let found = ReconConfig::find_config_path(dir.path()).unwrap();
    assert_eq!(found, dir.path().join("recon.toml"));
  }
}
