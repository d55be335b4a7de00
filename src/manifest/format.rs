//! Recognized dependency-manifest formats
//!
//! Recognition is by exact filename. The list is constant across the system;
//! adding a format means adding a variant here plus one extraction rule in
//! `drift::extract`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dependency-manifest format, recognized by filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestFormat {
  PackageJson,
  RequirementsTxt,
  CargoToml,
  Pipfile,
  ComposerJson,
  PubspecYaml,
  PnpmLock,
  YarnLock,
}

impl ManifestFormat {
  /// All recognized formats, in the order manifests are consulted
  /// during extraction (declaration files before lockfiles)
  pub const ALL: [ManifestFormat; 8] = [
    ManifestFormat::PackageJson,
    ManifestFormat::CargoToml,
    ManifestFormat::RequirementsTxt,
    ManifestFormat::Pipfile,
    ManifestFormat::ComposerJson,
    ManifestFormat::PubspecYaml,
    ManifestFormat::PnpmLock,
    ManifestFormat::YarnLock,
  ];

  /// Recognize a format from a bare filename
  pub fn from_filename(name: &str) -> Option<Self> {
    match name {
      "package.json" => Some(ManifestFormat::PackageJson),
      "requirements.txt" => Some(ManifestFormat::RequirementsTxt),
      "Cargo.toml" => Some(ManifestFormat::CargoToml),
      "Pipfile" => Some(ManifestFormat::Pipfile),
      "composer.json" => Some(ManifestFormat::ComposerJson),
      "pubspec.yaml" => Some(ManifestFormat::PubspecYaml),
      "pnpm-lock.yaml" => Some(ManifestFormat::PnpmLock),
      "yarn.lock" => Some(ManifestFormat::YarnLock),
      _ => None,
    }
  }

  /// The filename this format is recognized by
  pub fn filename(&self) -> &'static str {
    match self {
      ManifestFormat::PackageJson => "package.json",
      ManifestFormat::RequirementsTxt => "requirements.txt",
      ManifestFormat::CargoToml => "Cargo.toml",
      ManifestFormat::Pipfile => "Pipfile",
      ManifestFormat::ComposerJson => "composer.json",
      ManifestFormat::PubspecYaml => "pubspec.yaml",
      ManifestFormat::PnpmLock => "pnpm-lock.yaml",
      ManifestFormat::YarnLock => "yarn.lock",
    }
  }

  /// The package ecosystem this format belongs to
  pub fn ecosystem(&self) -> &'static str {
    match self {
      ManifestFormat::PackageJson | ManifestFormat::PnpmLock | ManifestFormat::YarnLock => "npm",
      ManifestFormat::RequirementsTxt | ManifestFormat::Pipfile => "python",
      ManifestFormat::CargoToml => "cargo",
      ManifestFormat::ComposerJson => "composer",
      ManifestFormat::PubspecYaml => "pub",
    }
  }
}

impl fmt::Display for ManifestFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.filename())
  }
}
