//! Codebase root resolution check

use super::trait_def::{Check, CheckContext, CheckResult, Severity};
use crate::core::config::ReconConfig;
use crate::core::error::ReconResult;
use crate::manifest::locator::{locate_manifests, resolve_codebases};

/// Check that every codebase resolves to a readable directory carrying at
/// least one recognized manifest
pub struct CodebaseRootsCheck;

impl Check for CodebaseRootsCheck {
  fn name(&self) -> &str {
    "codebase-roots"
  }

  fn description(&self) -> &str {
    "Resolve codebases and verify each root carries manifests"
  }

  fn run(&self, ctx: &CheckContext) -> ReconResult<CheckResult> {
    // A broken recon.toml is config-valid's finding; fall back to discovery here
    let config = ReconConfig::load_optional(&ctx.root).unwrap_or(None);
    let excludes = config.as_ref().map(|c| c.locator.exclude.clone()).unwrap_or_default();
    let codebases = resolve_codebases(&ctx.root, config.as_ref())?;

    let mut missing = Vec::new();
    let mut empty = Vec::new();
    for codebase in &codebases {
      if !codebase.root.is_dir() {
        missing.push(codebase.name.clone());
      } else if locate_manifests(codebase, &excludes).is_empty() {
        empty.push(codebase.name.clone());
      }
    }

    if !missing.is_empty() {
      return Ok(
        CheckResult::error(
          self.name(),
          format!("{} codebase root(s) do not exist: {}", missing.len(), missing.join(", ")),
          Some("Fix the `path` entries in recon.toml"),
        )
        .with_details(serde_json::json!({ "missing": missing, "empty": empty })),
      );
    }

    if !empty.is_empty() {
      return Ok(
        CheckResult {
          check_name: self.name().to_string(),
          passed: false,
          severity: Severity::Warning,
          message: format!(
            "{} codebase(s) carry no recognized manifest: {}",
            empty.len(),
            empty.join(", ")
          ),
          suggestion: Some("Drift entries for these codebases will all be ABSENT".to_string()),
          details: Some(serde_json::json!({ "empty": empty })),
        },
      );
    }

    Ok(CheckResult::pass(
      self.name(),
      format!("{} codebase(s) resolved, all carrying manifests", codebases.len()),
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_discovered_codebases_pass() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("api")).unwrap();
    std::fs::write(dir.path().join("api/package.json"), "{}").unwrap();

    let ctx = CheckContext {
      root: dir.path().to_path_buf(),
    };
    let result = CodebaseRootsCheck.run(&ctx).unwrap();
    assert!(result.passed, "{}", result.message);
  }

  #[test]
  fn test_configured_missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
      dir.path().join("recon.toml"),
      "[[codebases]]\nname = \"ghost\"\npath = \"nope\"\n",
    )
    .unwrap();

    let ctx = CheckContext {
      root: dir.path().to_path_buf(),
    };
    let result = CodebaseRootsCheck.run(&ctx).unwrap();
    assert!(!result.passed);
    assert_eq!(result.severity, Severity::Error);
    assert!(result.message.contains("ghost"));
  }
}
