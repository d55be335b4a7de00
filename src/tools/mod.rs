//! External collaborator tools (tree renderer, line counter)
//!
//! Collaborators are consumed through a narrow interface: detect on PATH,
//! invoke, pass stdout through. A missing or failing tool triggers a built-in
//! fallback with a visible stderr warning, never a crash; warnings stay off
//! stdout so `--json` output remains parseable.

use std::process::Command;

/// Candidate binaries for the directory tree renderer, preferred first
pub const TREE_RENDERERS: &[&str] = &["eza", "tree"];

/// The per-language line counting tool
pub const LOC_COUNTER: &str = "tokei";

/// Whether a tool is on PATH
pub fn is_available(tool: &str) -> bool {
  which::which(tool).is_ok()
}

/// First candidate found on PATH
pub fn find_tool(candidates: &'static [&'static str]) -> Option<&'static str> {
  candidates.iter().copied().find(|c| is_available(c))
}

/// Run a collaborator and pass its stdout through to ours
///
/// Returns Ok(false) when the tool exits non-zero; callers fall back.
pub fn passthrough(tool: &str, args: &[&str]) -> std::io::Result<bool> {
  let output = Command::new(tool).args(args).output()?;
  if !output.status.success() {
    return Ok(false);
  }
  print!("{}", String::from_utf8_lossy(&output.stdout));
  Ok(true)
}

/// Visible warning on stderr when a collaborator is skipped
pub fn warn_fallback(what: &str, fallback: &str) {
  eprintln!("⚠️  {} — {}", what, fallback);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unknown_tool_not_available() {
    assert!(!is_available("definitely-not-a-real-binary-name"));
    assert_eq!(find_tool(&["definitely-not-a-real-binary-name"]), None);
  }

  #[test]
  fn test_passthrough_missing_tool_is_io_error() {
    assert!(passthrough("definitely-not-a-real-binary-name", &[]).is_err());
  }
}
