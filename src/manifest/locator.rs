//! Manifest Locator: recursive, deterministic manifest discovery
//!
//! Walks each codebase root with gitignore-aware standard filters and a fixed
//! exclusion list for dependency caches and build output, so nested
//! third-party copies never surface as project manifests. Results are ordered
//! by path depth then lexical path, which makes "primary" manifest selection
//! deterministic (shallowest, then alphabetically first).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::core::config::ReconConfig;
use crate::core::error::{ReconError, ReconResult};
use crate::manifest::format::ManifestFormat;
use crate::utils;

/// Directory names never descended into, on top of the walker's standard
/// filters (hidden directories, gitignore rules)
pub const DEFAULT_EXCLUDES: &[&str] = &[
  "node_modules",
  "target",
  "build",
  "dist",
  "out",
  "vendor",
  "venv",
  "__pycache__",
  "Pods",
  "DerivedData",
  "coverage",
];

/// One independently-versioned project root under analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebase {
  pub name: String,
  pub root: PathBuf,
}

impl Codebase {
  pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      root: root.into(),
    }
  }
}

/// A dependency-manifest file found under a codebase root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
  /// Name of the codebase this manifest belongs to
  pub codebase: String,
  /// Recognized format (by filename)
  pub format: ManifestFormat,
  /// Absolute path on disk
  pub path: PathBuf,
  /// Path relative to the codebase root, forward slashes
  pub rel_path: String,
  /// Number of path components in `rel_path` (1 = directly in the root)
  pub depth: usize,
}

impl Manifest {
  /// Display label: codebase name joined with the relative path
  pub fn label(&self) -> String {
    format!("{}/{}", self.codebase, self.rel_path)
  }
}

/// Locate all recognized manifests under one codebase root
///
/// A nonexistent or unreadable root yields an empty result rather than an
/// error: one broken codebase must not fail the whole run.
pub fn locate_manifests(codebase: &Codebase, extra_excludes: &[String]) -> Vec<Manifest> {
  if !codebase.root.is_dir() {
    return Vec::new();
  }

  let walker = WalkBuilder::new(&codebase.root)
    .standard_filters(true)
    .filter_entry({
      let extra: Vec<String> = extra_excludes.to_vec();
      move |entry| {
        if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
          return true;
        }
        let name = entry.file_name().to_string_lossy();
        let name: &str = name.as_ref();
        !(DEFAULT_EXCLUDES.contains(&name) || extra.iter().any(|e| e.as_str() == name))
      }
    })
    .build();

  let mut manifests = Vec::new();
  for entry in walker.filter_map(|e| e.ok()) {
    if !entry.file_type().is_some_and(|t| t.is_file()) {
      continue;
    }
    let Some(format) = entry
      .file_name()
      .to_str()
      .and_then(ManifestFormat::from_filename)
    else {
      continue;
    };

    let rel_path = utils::normalize_rel(&codebase.root, entry.path());
    let depth = rel_path.split('/').count();
    manifests.push(Manifest {
      codebase: codebase.name.clone(),
      format,
      path: entry.path().to_path_buf(),
      rel_path,
      depth,
    });
  }

  // Shallowest first, then alphabetical: "primary" selection is deterministic
  manifests.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.rel_path.cmp(&b.rel_path)));
  manifests
}

/// Locate manifests across all codebases
///
/// Walks are independent and run in parallel; results are merged in codebase
/// order regardless of completion order, preserving the deterministic
/// ordering guarantee.
pub fn locate_all(codebases: &[Codebase], extra_excludes: &[String]) -> Vec<Manifest> {
  codebases
    .par_iter()
    .map(|cb| locate_manifests(cb, extra_excludes))
    .collect::<Vec<_>>()
    .into_iter()
    .flatten()
    .collect()
}

/// Select the primary manifest per (codebase, format): the first match in
/// locator order (shallowest, then alphabetically first)
pub fn primary_manifests(manifests: &[Manifest]) -> BTreeMap<(String, ManifestFormat), Manifest> {
  let mut primaries = BTreeMap::new();
  for manifest in manifests {
    primaries
      .entry((manifest.codebase.clone(), manifest.format))
      .or_insert_with(|| manifest.clone());
  }
  primaries
}

/// Resolve the codebases for a run: configured entries, or directory discovery
///
/// Discovery takes each immediate child directory of the project root that
/// contains at least one manifest; with no such child, the root itself is the
/// single codebase. A configured path that does not exist is kept as-is: the
/// locator returns no manifests for it and `recon doctor` flags it.
pub fn resolve_codebases(root: &Path, config: Option<&ReconConfig>) -> ReconResult<Vec<Codebase>> {
  if let Some(config) = config
    && !config.codebases.is_empty()
  {
    return Ok(
      config
        .codebases
        .iter()
        .map(|cb| {
          let path = if cb.path.is_absolute() {
            cb.path.clone()
          } else {
            root.join(&cb.path)
          };
          Codebase::new(cb.name.clone(), path)
        })
        .collect(),
    );
  }

  discover_codebases(root)
}

/// Discover codebases from the directory layout (no configuration)
pub fn discover_codebases(root: &Path) -> ReconResult<Vec<Codebase>> {
  let mut children: Vec<Codebase> = Vec::new();

  let entries = std::fs::read_dir(root).map_err(|e| ReconError::Root {
    path: root.to_path_buf(),
    source: e,
  })?;

  let mut candidates: Vec<(String, PathBuf)> = entries
    .filter_map(|e| e.ok())
    .filter(|e| e.path().is_dir())
    .filter_map(|e| {
      let name = e.file_name().to_string_lossy().into_owned();
      if name.starts_with('.') || DEFAULT_EXCLUDES.contains(&name.as_str()) {
        None
      } else {
        Some((name, e.path()))
      }
    })
    .collect();
  candidates.sort_by(|a, b| a.0.cmp(&b.0));

  for (name, path) in candidates {
    let codebase = Codebase::new(name, path);
    if !locate_manifests(&codebase, &[]).is_empty() {
      children.push(codebase);
    }
  }

  if children.is_empty() {
    let name = root
      .file_name()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_else(|| "root".to_string());
    children.push(Codebase::new(name, root));
  }

  Ok(children)
}
