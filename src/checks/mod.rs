//! Health checks and validation infrastructure
//!
//! All checks implement the `Check` trait, making it easy to add new checks
//! without modifying core logic.
//!
//! # Built-in Checks
//!
//! - **config-valid**: recon.toml parses and validates (pass when absent)
//! - **codebase-roots**: configured or discovered codebases resolve to
//!   readable directories with at least one manifest
//! - **external-tools**: collaborator tools (eza/tree, tokei) are on PATH;
//!   missing tools are warnings since every passthrough has a fallback

mod codebases;
mod config;
mod runner;
mod tools;
mod trait_def;

// Individual checks are not exported - they're registered in create_default_runner()
pub use runner::{CheckRunner, create_default_runner};
pub use trait_def::{Check, CheckContext, CheckResult, Severity};
