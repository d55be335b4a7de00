//! Core building blocks shared by every recon command
//!
//! - **config**: recon configuration (recon.toml) parsing and validation
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod error;
