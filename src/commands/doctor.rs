//! Doctor command: environment and configuration diagnostics

use std::path::PathBuf;

use crate::checks::{CheckContext, Severity, create_default_runner};
use crate::core::error::{ExitCode, ReconResult};
use crate::utils;

/// Run the doctor command
///
/// Returns Ok(()) if all checks pass, or exits with error code if checks fail
pub fn run_doctor(root: Option<PathBuf>, json: bool) -> ReconResult<()> {
  let root = utils::resolve_root(root)?;

  let ctx = CheckContext { root };
  let runner = create_default_runner();
  let results = runner.run_all(&ctx);

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
    return Ok(());
  }

  println!("🏥 Running diagnostics...\n");

  println!("📋 Registered checks:");
  for check in runner.checks() {
    println!("   • {}: {}", check.name(), check.description());
  }
  println!();

  let mut has_errors = false;
  let mut has_warnings = false;

  for result in &results {
    let icon = if result.passed { "✅" } else { "❌" };
    println!("{} {}: {}", icon, result.check_name, result.message);

    if !result.passed {
      if let Some(ref suggestion) = result.suggestion {
        println!("   💡 Fix: {}", suggestion);
      }

      match result.severity {
        Severity::Error => has_errors = true,
        Severity::Warning => has_warnings = true,
        _ => {}
      }
    }
    println!();
  }

  let passed_count = results.iter().filter(|r| r.passed).count();
  println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
  println!("Summary: {}/{} checks passed", passed_count, results.len());

  if has_errors {
    println!("\n⚠️  Critical issues found. Please fix errors before proceeding.");
    std::process::exit(ExitCode::Validation.as_i32());
  } else if has_warnings {
    println!("\n⚠️  Some warnings found. Consider addressing them.");
  } else {
    println!("\n✨ All checks passed! Your setup looks healthy.");
  }

  Ok(())
}
