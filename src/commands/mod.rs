//! CLI commands for recon
//!
//! ## Setup & Inspection
//! - **init**: Initialize recon.toml configuration for a project root
//! - **doctor**: Run environment and configuration diagnostics
//!
//! ## Core
//! - **health**: Manifest presence per codebase (Locator only, no parsing)
//! - **drift**: Cross-codebase version comparison for tracked packages
//!
//! ## Collaborator passthroughs
//! - **tree**: Directory tree via eza/tree, built-in fallback renderer
//! - **loc**: Per-language line counts via tokei, built-in fallback counter
//!
//! Every command takes the project root as an argument (default: current
//! directory) and offers `--json` for structured output on stdout; warnings
//! go to stderr.

pub mod doctor;
pub mod drift;
pub mod health;
pub mod init;
pub mod loc;
pub mod tree;

pub use doctor::run_doctor;
pub use drift::run_drift;
pub use health::run_health;
pub use init::run_init;
pub use loc::run_loc;
pub use tree::run_tree;
