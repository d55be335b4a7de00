//! Manifest discovery
//!
//! - **format**: the fixed set of recognized dependency-manifest filenames
//! - **locator**: recursive, deterministic manifest discovery per codebase
//!
//! The locator is shared by the health check (presence only) and the drift
//! reconciler (presence + extraction); presence-only callers never pay the
//! parsing cost.

pub mod format;
pub mod locator;

pub use format::ManifestFormat;
pub use locator::{Codebase, Manifest, discover_codebases, locate_all, locate_manifests, primary_manifests};
