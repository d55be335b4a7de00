//! Health command: manifest presence per codebase
//!
//! Reuses the Manifest Locator's output without the Reconciler's comparison
//! logic; presence reporting never pays the parsing cost.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::config::ReconConfig;
use crate::core::error::ReconResult;
use crate::manifest::format::ManifestFormat;
use crate::manifest::locator::{locate_all, primary_manifests, resolve_codebases};
use crate::utils;

/// Presence of one manifest format in one codebase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceEntry {
  pub codebase: String,
  pub manifest: String,
  pub ecosystem: String,
  pub present: bool,
  /// Codebase-relative path of the primary match, when present
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
}

/// Run the health command
pub fn run_health(root: Option<PathBuf>, json: bool) -> ReconResult<()> {
  let root = utils::resolve_root(root)?;
  let config = ReconConfig::load_optional(&root)?;
  let excludes = config.as_ref().map(|c| c.locator.exclude.clone()).unwrap_or_default();

  let codebases = resolve_codebases(&root, config.as_ref())?;
  let manifests = locate_all(&codebases, &excludes);
  let primaries = primary_manifests(&manifests);

  let mut entries = Vec::new();
  for codebase in &codebases {
    for format in ManifestFormat::ALL {
      let primary = primaries.get(&(codebase.name.clone(), format));
      entries.push(PresenceEntry {
        codebase: codebase.name.clone(),
        manifest: format.filename().to_string(),
        ecosystem: format.ecosystem().to_string(),
        present: primary.is_some(),
        path: primary.map(|m| m.rel_path.clone()),
      });
    }
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
  } else {
    print_presence(&entries, codebases.len());
  }

  Ok(())
}

fn print_presence(entries: &[PresenceEntry], codebase_count: usize) {
  println!("\n🩺 Manifest health across {} codebase(s)\n", codebase_count);

  let mut current = "";
  for entry in entries {
    if entry.codebase != current {
      if !current.is_empty() {
        println!();
      }
      current = &entry.codebase;
      println!("📦 {}", entry.codebase);
    }

    match &entry.path {
      Some(path) => println!("   ✅ {:<18} {}", entry.manifest, path),
      None => println!("   ·  {}", entry.manifest),
    }
  }

  let present = entries.iter().filter(|e| e.present).count();
  println!("\nSummary: {}/{} manifest slots present", present, entries.len());
}
