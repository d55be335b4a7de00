//! Integration tests for `recon health`

use crate::helpers::{TestProject, run_recon, run_recon_unchecked, stdout_of};
use anyhow::Result;

#[test]
fn test_presence_matrix_json() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("backend")?;
  project.write_file("backend", "package.json", "{}")?;
  project.write_file("backend", "requirements.txt", "requests==2.31.0\n")?;

  let output = run_recon(&project.path, &["health", "--json"])?;
  let entries: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  let entries = entries.as_array().unwrap();

  // One entry per (codebase, recognized format)
  assert_eq!(entries.len(), 8);

  let lookup = |manifest: &str| {
    entries
      .iter()
      .find(|e| e["manifest"] == manifest)
      .unwrap_or_else(|| panic!("no entry for {}", manifest))
  };

  assert_eq!(lookup("package.json")["present"], true);
  assert_eq!(lookup("package.json")["path"], "package.json");
  assert_eq!(lookup("requirements.txt")["present"], true);
  // No false positives from unrelated files
  assert_eq!(lookup("Cargo.toml")["present"], false);
  assert_eq!(lookup("pubspec.yaml")["present"], false);

  Ok(())
}

#[test]
fn test_configured_codebase_without_manifests_is_all_absent() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("empty")?;
  project.write_config("[[codebases]]\nname = \"empty\"\npath = \"empty\"\n")?;

  let output = run_recon(&project.path, &["health", "--json"])?;
  let entries: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;

  assert!(
    entries
      .as_array()
      .unwrap()
      .iter()
      .all(|e| e["present"] == false && e["codebase"] == "empty")
  );

  Ok(())
}

#[test]
fn test_human_output_names_codebases() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("backend")?;
  project.write_file("backend", "Cargo.toml", "[package]\nname = \"api\"\n")?;

  let output = run_recon(&project.path, &["health"])?;
  let stdout = stdout_of(&output);
  assert!(stdout.contains("backend"));
  assert!(stdout.contains("Cargo.toml"));

  Ok(())
}

#[test]
fn test_unreadable_root_is_fatal() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_recon_unchecked(&project.path, &["health", "definitely/not/a/dir"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot read project root"));

  Ok(())
}

#[test]
fn test_monorepo_primary_is_shallowest_then_lexical() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("web")?;
  project.write_file("web", "packages/zeta/package.json", "{}")?;
  project.write_file("web", "packages/alpha/package.json", "{}")?;

  let output = run_recon(&project.path, &["health", "--json"])?;
  let entries: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  let package_json = entries
    .as_array()
    .unwrap()
    .iter()
    .find(|e| e["manifest"] == "package.json")
    .unwrap();

  assert_eq!(package_json["path"], "packages/alpha/package.json");

  Ok(())
}
