//! Version Reconciler: cross-codebase version drift detection
//!
//! - **tracked**: tracked package names and prefix families
//! - **extract**: one format-aware extraction rule per manifest format
//! - **reconcile**: drift report computation over located manifests
//!
//! Comparison is exact string equality, not semver resolution: the tool flags
//! textual divergence ("^5.1.0" vs "5.1.0" counts as drift).

mod extract;
mod reconcile;
mod tracked;

pub use extract::{ExtractionRule, FoundEntry, ParseFailure, rule_for};
pub use reconcile::{DriftReport, PackageReport, Reason, Reconciler, Verdict, VersionEntry};
pub use tracked::TrackedPackage;
