//! Small path helpers shared across commands

use std::path::{Path, PathBuf};

use crate::core::error::{ReconError, ReconResult};

/// Resolve the project root argument (default: current directory) and verify
/// it is a readable directory
///
/// An unreadable root is the one fatal condition of a run; everything below
/// it degrades to per-entry reason codes instead.
pub fn resolve_root(root: Option<PathBuf>) -> ReconResult<PathBuf> {
  let root = match root {
    Some(path) => path,
    None => std::env::current_dir()?,
  };

  // read_dir doubles as the readability probe (exists + is dir + permission)
  std::fs::read_dir(&root).map_err(|e| ReconError::Root {
    path: root.clone(),
    source: e,
  })?;

  Ok(root.canonicalize().unwrap_or(root))
}

/// Path relative to a root, normalized to forward slashes
pub fn normalize_rel(root: &Path, path: &Path) -> String {
  let rel = path.strip_prefix(root).unwrap_or(path);
  rel.to_string_lossy().replace('\\', "/")
}
