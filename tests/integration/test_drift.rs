//! Integration tests for `recon drift`

use crate::helpers::{TestProject, run_recon, run_recon_unchecked, stdout_of};
use anyhow::Result;

fn firebase_project() -> Result<TestProject> {
  let project = TestProject::new()?;
  project.add_codebase("backend")?;
  project.add_codebase("frontend")?;
  project.write_file(
    "backend",
    "package.json",
    r#"{ "dependencies": { "firebase-admin": "12.0.0" } }"#,
  )?;
  project.write_file(
    "frontend",
    "package.json",
    r#"{ "dependencies": { "firebase": "10.1.0" } }"#,
  )?;
  Ok(project)
}

#[test]
fn test_firebase_family_mismatch_end_to_end() -> Result<()> {
  let project = firebase_project()?;

  // Drift is a finding, not a failure: run_recon asserts exit code 0
  let output = run_recon(&project.path, &["drift", "--package", "firebase*", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;

  let packages = report.as_array().unwrap();
  assert_eq!(packages.len(), 1);
  assert_eq!(packages[0]["package"], "firebase");
  assert_eq!(packages[0]["verdict"], "MISMATCHED");

  let entries = packages[0]["entries"].as_array().unwrap();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0]["codebase"], "backend");
  assert_eq!(entries[0]["version"], "12.0.0");
  assert_eq!(entries[0]["reason"], "FOUND");
  assert_eq!(entries[0]["matched_name"], "firebase-admin");
  assert_eq!(entries[1]["codebase"], "frontend");
  assert_eq!(entries[1]["version"], "10.1.0");

  Ok(())
}

#[test]
fn test_matched_verdict_for_identical_versions() -> Result<()> {
  let project = TestProject::new()?;
  for codebase in ["backend", "frontend"] {
    project.add_codebase(codebase)?;
    project.write_file(
      codebase,
      "package.json",
      r#"{ "devDependencies": { "typescript": "5.2.2" } }"#,
    )?;
  }

  let output = run_recon(&project.path, &["drift", "--package", "typescript", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(report[0]["verdict"], "MATCHED");

  Ok(())
}

#[test]
fn test_absent_everywhere_is_insufficient_data() -> Result<()> {
  let project = firebase_project()?;

  let output = run_recon(&project.path, &["drift", "--package", "lodash", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;

  assert_eq!(report[0]["verdict"], "INSUFFICIENT_DATA");
  let entries = report[0]["entries"].as_array().unwrap();
  assert_eq!(entries.len(), 2);
  assert!(entries.iter().all(|e| e["reason"] == "ABSENT"));
  assert!(entries.iter().all(|e| e["version"].is_null()));

  Ok(())
}

#[test]
fn test_parse_error_does_not_abort_other_codebases() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("broken")?;
  project.add_codebase("intact")?;
  project.write_file("broken", "package.json", "{ definitely not json")?;
  project.write_file(
    "intact",
    "package.json",
    r#"{ "dependencies": { "firebase": "10.1.0" } }"#,
  )?;

  let output = run_recon(&project.path, &["drift", "--package", "firebase", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;

  let entries = report[0]["entries"].as_array().unwrap();
  assert_eq!(entries[0]["codebase"], "broken");
  assert_eq!(entries[0]["reason"], "PARSE_ERROR");
  assert_eq!(entries[1]["codebase"], "intact");
  assert_eq!(entries[1]["reason"], "FOUND");
  assert_eq!(entries[1]["version"], "10.1.0");

  Ok(())
}

#[test]
fn test_reports_are_byte_identical_across_runs() -> Result<()> {
  let project = firebase_project()?;
  let args = ["drift", "--package", "firebase*", "--json"];

  let first = stdout_of(&run_recon(&project.path, &args)?);
  let second = stdout_of(&run_recon(&project.path, &args)?);
  assert_eq!(first, second);

  Ok(())
}

#[test]
fn test_strict_promotes_mismatch_to_failure() -> Result<()> {
  let project = firebase_project()?;

  let output = run_recon_unchecked(&project.path, &["drift", "--package", "firebase*", "--strict"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}

#[test]
fn test_tracked_packages_from_config() -> Result<()> {
  let project = firebase_project()?;
  project.write_config(
    r#"
[[codebases]]
name = "backend"
path = "backend"

[[codebases]]
name = "frontend"
path = "frontend"

[[tracked]]
name = "firebase"
match = "prefix"
"#,
  )?;

  let output = run_recon(&project.path, &["drift", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(report[0]["package"], "firebase");
  assert_eq!(report[0]["verdict"], "MISMATCHED");

  Ok(())
}

#[test]
fn test_no_tracked_packages_is_an_error() -> Result<()> {
  let project = firebase_project()?;

  let output = run_recon_unchecked(&project.path, &["drift"])?;
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("tracked"), "stderr should explain the fix: {}", stderr);

  Ok(())
}

#[test]
fn test_nested_third_party_copies_are_ignored() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("app")?;
  project.add_codebase("web")?;
  // Only nested dependency copies declare firebase; they must not count
  project.write_file(
    "app",
    "node_modules/firebase/package.json",
    r#"{ "dependencies": { "firebase": "9.0.0" } }"#,
  )?;
  project.write_file("app", "package.json", r#"{ "dependencies": { "react": "18.2.0" } }"#)?;
  project.write_file("web", "package.json", r#"{ "dependencies": { "react": "18.2.0" } }"#)?;

  let output = run_recon(&project.path, &["drift", "--package", "firebase", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(report[0]["verdict"], "INSUFFICIENT_DATA");

  Ok(())
}

#[test]
fn test_cross_ecosystem_drift() -> Result<()> {
  let project = TestProject::new()?;
  project.add_codebase("api")?;
  project.add_codebase("mobile")?;
  project.write_file("api", "requirements.txt", "firebase-admin==6.2.0\n")?;
  project.write_file(
    "mobile",
    "pubspec.yaml",
    "name: mobile\ndependencies:\n  firebase_core: 6.2.0\n",
  )?;

  let output = run_recon(&project.path, &["drift", "--package", "firebase*", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;

  // Same version string in both ecosystems: textual comparison matches
  assert_eq!(report[0]["verdict"], "MATCHED");

  Ok(())
}
