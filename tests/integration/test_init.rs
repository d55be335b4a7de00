//! Integration tests for `recon init` and `recon doctor`

use crate::helpers::{TestProject, run_recon, run_recon_unchecked, stdout_of};
use anyhow::Result;

#[test]
fn test_init_prefills_discovered_codebases() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("backend")?;
  project.add_codebase("frontend")?;
  project.write_file("backend", "package.json", "{}")?;
  project.write_file("frontend", "pubspec.yaml", "name: app\n")?;

  run_recon(&project.path, &["init"])?;

  assert!(project.file_exists("recon.toml"));
  let config = project.read_file("recon.toml")?;
  assert!(config.contains("name = \"backend\""));
  assert!(config.contains("name = \"frontend\""));

  Ok(())
}

#[test]
fn test_init_refuses_existing_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config("")?;

  let output = run_recon_unchecked(&project.path, &["init"])?;
  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

  Ok(())
}

#[test]
fn test_doctor_json_reports_all_checks() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("api")?;
  project.write_file("api", "package.json", "{}")?;

  let output = run_recon(&project.path, &["doctor", "--json"])?;
  let results: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  let names: Vec<&str> = results
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["check_name"].as_str().unwrap())
    .collect();

  assert_eq!(names, vec!["config-valid", "codebase-roots", "external-tools"]);

  Ok(())
}

#[test]
fn test_doctor_fails_on_broken_config() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("api")?;
  project.write_file("api", "package.json", "{}")?;
  project.write_config("[[codebases]\nbroken =")?;

  let output = run_recon_unchecked(&project.path, &["doctor"])?;
  assert_eq!(output.status.code(), Some(3));

  Ok(())
}
