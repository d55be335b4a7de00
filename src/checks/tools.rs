//! External collaborator availability check

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReconResult;
use crate::tools;

/// Check which collaborator tools are reachable on PATH
///
/// Missing tools are warnings, not errors: every passthrough command has a
/// built-in fallback.
pub struct ExternalToolsCheck;

impl Check for ExternalToolsCheck {
  fn name(&self) -> &str {
    "external-tools"
  }

  fn description(&self) -> &str {
    "Detect collaborator tools (eza/tree, tokei) on PATH"
  }

  fn run(&self, _ctx: &CheckContext) -> ReconResult<CheckResult> {
    let renderer = tools::find_tool(tools::TREE_RENDERERS);
    let counter = tools::is_available(tools::LOC_COUNTER);

    let mut missing = Vec::new();
    if renderer.is_none() {
      missing.push("eza/tree");
    }
    if !counter {
      missing.push("tokei");
    }

    let details = serde_json::json!({
      "tree_renderer": renderer,
      "tokei": counter,
    });

    if missing.is_empty() {
      Ok(CheckResult::pass(self.name(), "All collaborator tools available").with_details(details))
    } else {
      Ok(
        CheckResult::warning(
          self.name(),
          format!("Missing collaborator tool(s): {}", missing.join(", ")),
          Some("Built-in fallbacks will be used; install the tools for richer output"),
        )
        .with_details(details),
      )
    }
  }
}
