//! Drift report computation
//!
//! For every (codebase, tracked package) pair exactly one version entry is
//! produced, defaulting to ABSENT rather than being omitted, so downstream
//! consumers never special-case missing data. A malformed manifest degrades
//! the affected pairs to PARSE_ERROR without touching other codebases.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::drift::extract::rule_for;
use crate::drift::tracked::TrackedPackage;
use crate::manifest::format::ManifestFormat;
use crate::manifest::locator::{Codebase, Manifest, primary_manifests};

/// Why a version entry has (or lacks) a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
  /// The package is declared with a version string
  Found,
  /// No manifest of the codebase declares the package (normal condition)
  Absent,
  /// A manifest exists but could not be parsed
  ParseError,
}

impl fmt::Display for Reason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Reason::Found => write!(f, "FOUND"),
      Reason::Absent => write!(f, "ABSENT"),
      Reason::ParseError => write!(f, "PARSE_ERROR"),
    }
  }
}

/// Per-package classification across all codebases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
  /// All found version strings are identical (two or more codebases)
  Matched,
  /// Two or more distinct version strings are declared
  Mismatched,
  /// Fewer than two codebases declare the package at all
  InsufficientData,
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Verdict::Matched => write!(f, "MATCHED"),
      Verdict::Mismatched => write!(f, "MISMATCHED"),
      Verdict::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
    }
  }
}

/// Result of extracting one tracked package from one codebase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
  pub codebase: String,
  /// Raw declared version string; None unless reason is FOUND
  pub version: Option<String>,
  pub reason: Reason,
  /// Concrete entry name, when a prefix family matched something other than
  /// the family stem itself
  #[serde(skip_serializing_if = "Option::is_none")]
  pub matched_name: Option<String>,
  /// Manifest the version was extracted from (codebase-relative label)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub manifest: Option<String>,
}

/// All entries and the verdict for one tracked package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageReport {
  pub package: String,
  pub verdict: Verdict,
  pub entries: Vec<VersionEntry>,
}

/// The aggregate drift report for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
  pub packages: Vec<PackageReport>,
}

impl DriftReport {
  pub fn has_mismatch(&self) -> bool {
    self.packages.iter().any(|p| p.verdict == Verdict::Mismatched)
  }
}

/// Version Reconciler: extracts tracked package versions from each
/// codebase's primary manifests and computes the drift report
pub struct Reconciler<'a> {
  codebases: &'a [Codebase],
  /// Primary manifest per (codebase, format), in codebase order then
  /// `ManifestFormat::ALL` order (declaration files before lockfiles)
  primaries: Vec<Manifest>,
  /// Manifest text, read once per run; Err keeps the read failure
  contents: HashMap<PathBuf, Result<String, String>>,
}

impl<'a> Reconciler<'a> {
  pub fn new(codebases: &'a [Codebase], manifests: &[Manifest]) -> Self {
    let by_key = primary_manifests(manifests);

    let mut primaries = Vec::new();
    for codebase in codebases {
      for format in ManifestFormat::ALL {
        if let Some(manifest) = by_key.get(&(codebase.name.clone(), format)) {
          primaries.push(manifest.clone());
        }
      }
    }

    let contents = primaries
      .iter()
      .map(|m| {
        let read = fs::read_to_string(&m.path).map_err(|e| e.to_string());
        (m.path.clone(), read)
      })
      .collect();

    Self {
      codebases,
      primaries,
      contents,
    }
  }

  /// Compute the drift report for the tracked package list
  ///
  /// Package order and codebase order are preserved, so reports over
  /// unchanged filesystem state are byte-identical across runs.
  pub fn analyze(&self, tracked: &[TrackedPackage]) -> DriftReport {
    let packages = tracked
      .iter()
      .map(|package| {
        let entries: Vec<VersionEntry> = self
          .codebases
          .iter()
          .map(|codebase| self.entry_for(&codebase.name, package))
          .collect();
        let verdict = Self::verdict(&entries);
        PackageReport {
          package: package.name.clone(),
          verdict,
          entries,
        }
      })
      .collect();

    DriftReport { packages }
  }

  /// Exactly one entry per (codebase, package): the first FOUND across the
  /// codebase's primary manifests wins; otherwise PARSE_ERROR if any
  /// manifest was unreadable, else ABSENT
  fn entry_for(&self, codebase: &str, package: &TrackedPackage) -> VersionEntry {
    let mut parse_error = false;

    for manifest in self.primaries.iter().filter(|m| m.codebase == codebase) {
      let content = match self.contents.get(&manifest.path) {
        Some(Ok(content)) => content,
        Some(Err(_)) => {
          parse_error = true;
          continue;
        }
        None => continue,
      };

      match rule_for(manifest.format).extract(content, package) {
        Ok(Some(found)) => {
          let matched_name = (found.name != package.name).then_some(found.name);
          return VersionEntry {
            codebase: codebase.to_string(),
            version: Some(found.version),
            reason: Reason::Found,
            matched_name,
            manifest: Some(manifest.label()),
          };
        }
        Ok(None) => {}
        Err(_) => parse_error = true,
      }
    }

    VersionEntry {
      codebase: codebase.to_string(),
      version: None,
      reason: if parse_error { Reason::ParseError } else { Reason::Absent },
      matched_name: None,
      manifest: None,
    }
  }

  /// Exact string comparison over found versions, no semver normalization
  fn verdict(entries: &[VersionEntry]) -> Verdict {
    let found: Vec<&String> = entries
      .iter()
      .filter(|e| e.reason == Reason::Found)
      .filter_map(|e| e.version.as_ref())
      .collect();

    if found.len() < 2 {
      return Verdict::InsufficientData;
    }

    let distinct: BTreeSet<&String> = found.iter().copied().collect();
    if distinct.len() > 1 { Verdict::Mismatched } else { Verdict::Matched }
  }
}
