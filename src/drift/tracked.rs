//! Tracked package names and prefix families

use std::fmt;

use crate::core::config::{MatchMode, TrackedConfig};

/// A package name (or name-family) whose version is compared across codebases
///
/// The list of tracked packages is fixed configuration for a run, never
/// inferred from manifest contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPackage {
  pub name: String,
  pub mode: MatchMode,
}

impl TrackedPackage {
  pub fn exact(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      mode: MatchMode::Exact,
    }
  }

  pub fn prefix(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      mode: MatchMode::Prefix,
    }
  }

  /// Parse a CLI spec: a trailing '*' selects prefix mode ("firebase*")
  pub fn parse_spec(spec: &str) -> Self {
    match spec.strip_suffix('*') {
      Some(stem) => Self::prefix(stem),
      None => Self::exact(spec),
    }
  }

  /// Case-sensitive match of a manifest entry name against this package
  pub fn matches(&self, candidate: &str) -> bool {
    match self.mode {
      MatchMode::Exact => candidate == self.name,
      MatchMode::Prefix => candidate.starts_with(&self.name),
    }
  }
}

impl From<&TrackedConfig> for TrackedPackage {
  fn from(config: &TrackedConfig) -> Self {
    Self {
      name: config.name.clone(),
      mode: config.match_mode,
    }
  }
}

impl fmt::Display for TrackedPackage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.mode {
      MatchMode::Exact => write!(f, "{}", self.name),
      MatchMode::Prefix => write!(f, "{}*", self.name),
    }
  }
}
