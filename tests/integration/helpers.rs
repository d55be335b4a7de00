//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test project root with codebase subdirectories
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create an empty project root
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Add a codebase directory
  pub fn add_codebase(&self, name: &str) -> Result<PathBuf> {
    let path = self.path.join(name);
    std::fs::create_dir_all(&path)?;
    Ok(path)
  }

  /// Write a manifest (or any file) inside a codebase
  pub fn write_file(&self, codebase: &str, rel_path: &str, content: &str) -> Result<()> {
    let path = self.path.join(codebase).join(rel_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Write recon.toml at the project root
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("recon.toml"), content)?;
    Ok(())
  }

  /// Check if a file exists under the project root
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file under the project root
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run the recon CLI and fail the test on a non-zero exit
pub fn run_recon(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_recon_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "recon command failed: recon {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the recon CLI without checking the exit status
pub fn run_recon_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let recon_bin = env!("CARGO_BIN_EXE_recon");

  Command::new(recon_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run recon")
}

/// Decode stdout as UTF-8
pub fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}
