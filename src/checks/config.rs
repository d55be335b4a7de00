//! Configuration validity check

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::config::ReconConfig;
use crate::core::error::ReconResult;

/// Check that recon.toml, when present, parses and validates
pub struct ConfigValidCheck;

impl Check for ConfigValidCheck {
  fn name(&self) -> &str {
    "config-valid"
  }

  fn description(&self) -> &str {
    "Validate recon.toml when present"
  }

  fn run(&self, ctx: &CheckContext) -> ReconResult<CheckResult> {
    if !ReconConfig::exists(&ctx.root) {
      return Ok(CheckResult::pass(
        self.name(),
        "No recon.toml found; directory discovery and --package flags apply",
      ));
    }

    match ReconConfig::load(&ctx.root) {
      Ok(config) => Ok(
        CheckResult::pass(
          self.name(),
          format!(
            "recon.toml is valid ({} codebase(s), {} tracked package(s))",
            config.codebases.len(),
            config.tracked.len()
          ),
        )
        .with_details(serde_json::json!({
          "codebases": config.codebases.iter().map(|c| c.name.clone()).collect::<Vec<_>>(),
          "tracked": config.tracked.iter().map(|t| t.name.clone()).collect::<Vec<_>>(),
        })),
      ),
      Err(err) => Ok(CheckResult::error(
        self.name(),
        err.to_string(),
        Some("Fix recon.toml, or run `recon init` to regenerate a skeleton"),
      )),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_absent_config_passes() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CheckContext {
      root: dir.path().to_path_buf(),
    };
    let result = ConfigValidCheck.run(&ctx).unwrap();
    assert!(result.passed);
  }

  #[test]
  fn test_broken_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("recon.toml"), "[[codebases]\nbroken").unwrap();
    let ctx = CheckContext {
      root: dir.path().to_path_buf(),
    };
    let result = ConfigValidCheck.run(&ctx).unwrap();
    assert!(!result.passed);
  }

  #[test]
  fn test_check_name() {
    assert_eq!(ConfigValidCheck.name(), "config-valid");
  }
}
