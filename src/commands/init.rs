//! Init command: write a recon.toml skeleton

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::core::config::ReconConfig;
use crate::core::error::{ReconError, ReconResult, ResultExt};
use crate::manifest::locator::discover_codebases;
use crate::utils;

/// Run the init command
///
/// Pre-fills `[[codebases]]` from directory discovery so the generated file
/// reflects what the other commands would see anyway.
pub fn run_init(root: Option<PathBuf>) -> ReconResult<()> {
  let root = utils::resolve_root(root)?;

  if ReconConfig::exists(&root) {
    return Err(ReconError::with_help(
      "recon.toml already exists",
      "Edit it directly, or delete it first to regenerate the skeleton.",
    ));
  }

  let codebases = discover_codebases(&root)?;

  let mut content = String::from("# recon configuration\n");
  for codebase in &codebases {
    let path = utils::normalize_rel(&root, &codebase.root);
    let path = if path.is_empty() { ".".to_string() } else { path };
    let _ = write!(
      content,
      "\n[[codebases]]\nname = \"{}\"\npath = \"{}\"\n",
      codebase.name, path
    );
  }

  content.push_str(
    "\n# Packages compared across codebases by `recon drift`.\n\
     # match = \"prefix\" compares a whole SDK family (firebase, firebase-admin, ...).\n\
     #\n\
     # [[tracked]]\n\
     # name = \"firebase\"\n\
     # match = \"prefix\"\n\
     \n\
     # Directories skipped during manifest discovery, on top of the built-ins.\n\
     #\n\
     # [locator]\n\
     # exclude = [\"third_party\"]\n",
  );

  let path = root.join("recon.toml");
  std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

  println!("✅ Created {}", path.display());
  println!("   {} codebase(s) pre-filled from directory discovery", codebases.len());
  println!("\nNext steps:");
  println!("  1. Add [[tracked]] entries for the packages to compare");
  println!("  2. Run `recon drift` to check for version drift");

  Ok(())
}
