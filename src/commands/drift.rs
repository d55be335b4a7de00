//! Drift command: cross-codebase version comparison

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::config::ReconConfig;
use crate::core::error::{ConfigError, ReconError, ReconResult, ResultExt};
use crate::drift::{DriftReport, Reason, Reconciler, TrackedPackage, Verdict};
use crate::manifest::locator::{locate_all, resolve_codebases};
use crate::utils;

/// Run the drift command
///
/// Drift is a finding, not a failure: the exit code stays 0 even when
/// verdicts are MISMATCHED, unless `--strict` promotes them.
pub fn run_drift(root: Option<PathBuf>, packages: Vec<String>, json: bool, strict: bool) -> ReconResult<()> {
  let root = utils::resolve_root(root)?;
  let config = ReconConfig::load_optional(&root)?;

  let tracked = tracked_packages(&packages, config.as_ref())?;
  let excludes = config.as_ref().map(|c| c.locator.exclude.clone()).unwrap_or_default();

  let codebases = resolve_codebases(&root, config.as_ref())?;
  let manifests = locate_all(&codebases, &excludes);
  let report = Reconciler::new(&codebases, &manifests).analyze(&tracked);

  // Parse failures surface as data in the report; the human-visible warning
  // goes to stderr so --json stdout stays parseable
  warn_parse_errors(&report);

  if json {
    let rendered = serde_json::to_string_pretty(&report.packages).context("Failed to serialize drift report")?;
    println!("{}", rendered);
  } else {
    print_drift_report(&report, &tracked, codebases.len());
  }

  if strict && report.has_mismatch() {
    std::process::exit(1);
  }

  Ok(())
}

/// Tracked packages for this run: `--package` flags win over recon.toml
fn tracked_packages(specs: &[String], config: Option<&ReconConfig>) -> ReconResult<Vec<TrackedPackage>> {
  if !specs.is_empty() {
    let mut tracked = Vec::new();
    for spec in specs {
      let package = TrackedPackage::parse_spec(spec);
      if package.name.is_empty() {
        return Err(ReconError::with_help(
          format!("Invalid package spec: '{}'", spec),
          "Use a package name, or a name with a trailing '*' for a prefix family",
        ));
      }
      tracked.push(package);
    }
    return Ok(tracked);
  }

  let configured: Vec<TrackedPackage> = config
    .map(|c| c.tracked.iter().map(TrackedPackage::from).collect())
    .unwrap_or_default();

  if configured.is_empty() {
    return Err(ReconError::Config(ConfigError::NoTrackedPackages));
  }
  Ok(configured)
}

fn warn_parse_errors(report: &DriftReport) {
  let broken: BTreeSet<&str> = report
    .packages
    .iter()
    .flat_map(|p| &p.entries)
    .filter(|e| e.reason == Reason::ParseError)
    .map(|e| e.codebase.as_str())
    .collect();

  for codebase in broken {
    eprintln!(
      "⚠️  codebase '{}': a manifest could not be parsed; affected entries report PARSE_ERROR",
      codebase
    );
  }
}

fn print_drift_report(report: &DriftReport, tracked: &[TrackedPackage], codebase_count: usize) {
  println!(
    "\n🔎 Version drift: {} tracked package(s) across {} codebase(s)\n",
    report.packages.len(),
    codebase_count
  );

  for (package, spec) in report.packages.iter().zip(tracked) {
    let icon = match package.verdict {
      Verdict::Matched => "✅",
      Verdict::Mismatched => "⚠️ ",
      Verdict::InsufficientData => "❔",
    };
    println!("{} {} — {}", icon, spec, package.verdict);

    for entry in &package.entries {
      let version = entry.version.as_deref().unwrap_or("not found");
      let mut origin = Vec::new();
      if let Some(name) = &entry.matched_name {
        origin.push(name.clone());
      }
      if let Some(manifest) = &entry.manifest {
        origin.push(manifest.clone());
      }
      if entry.reason != Reason::Found {
        origin.push(entry.reason.to_string());
      }

      if origin.is_empty() {
        println!("   {:<16} {}", entry.codebase, version);
      } else {
        println!("   {:<16} {:<14} ({})", entry.codebase, version, origin.join(", "));
      }
    }
    println!();
  }

  let mismatched = report
    .packages
    .iter()
    .filter(|p| p.verdict == Verdict::Mismatched)
    .count();
  let matched = report.packages.iter().filter(|p| p.verdict == Verdict::Matched).count();
  let insufficient = report
    .packages
    .iter()
    .filter(|p| p.verdict == Verdict::InsufficientData)
    .count();

  println!(
    "Summary: {} mismatched, {} matched, {} with insufficient data",
    mismatched, matched, insufficient
  );

  if mismatched > 0 {
    println!("\nDrift is reported, not failed; use --strict to exit non-zero on mismatches.");
  }
}
