//! Error types for recon with contextual messages and exit codes
//!
//! Failures local to a single manifest or tracked package are never surfaced
//! through this module: they travel as reason codes inside the reports (see
//! `drift::reconcile::Reason`). Only run-level failures (unreadable root,
//! invalid arguments, broken configuration) become a `ReconError`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for recon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args)
  User = 1,
  /// System error (I/O, unreadable project root)
  System = 2,
  /// Findings promoted to failures (`drift --strict`, doctor errors)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for recon
#[derive(Debug)]
pub enum ReconError {
  /// Configuration errors
  Config(ConfigError),

  /// Project root is missing or unreadable (fatal for the whole run)
  Root { path: PathBuf, source: io::Error },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReconError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReconError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReconError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReconError::Message { message, context, help } => ReconError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReconError::Config(_) => ExitCode::User,
      ReconError::Root { .. } => ExitCode::System,
      ReconError::Io(_) => ExitCode::System,
      ReconError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReconError::Config(e) => e.help_message(),
      ReconError::Root { .. } => Some("Pass an existing, readable directory as the project root.".to_string()),
      ReconError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReconError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReconError::Config(e) => write!(f, "{}", e),
      ReconError::Root { path, source } => {
        write!(f, "Cannot read project root {}: {}", path.display(), source)
      }
      ReconError::Io(e) => write!(f, "I/O error: {}", e),
      ReconError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReconError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReconError::Io(e) => Some(e),
      ReconError::Root { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ReconError {
  fn from(err: io::Error) -> Self {
    ReconError::Io(err)
  }
}

impl From<String> for ReconError {
  fn from(msg: String) -> Self {
    ReconError::message(msg)
  }
}

impl From<&str> for ReconError {
  fn from(msg: &str) -> Self {
    ReconError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ReconError {
  fn from(err: toml_edit::TomlError) -> Self {
    ReconError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReconError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReconError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReconError {
  fn from(err: serde_json::Error) -> Self {
    ReconError::message(format!("JSON error: {}", err))
  }
}

impl From<serde_yaml::Error> for ReconError {
  fn from(err: serde_yaml::Error) -> Self {
    ReconError::message(format!("YAML error: {}", err))
  }
}

impl From<ignore::Error> for ReconError {
  fn from(err: ignore::Error) -> Self {
    ReconError::message(format!("Directory walk error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for ReconError {
  fn from(err: std::path::StripPrefixError) -> Self {
    ReconError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ReconError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ReconError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<anyhow::Error> for ReconError {
  fn from(err: anyhow::Error) -> Self {
    ReconError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// recon.toml exists but cannot be parsed
  Invalid { path: PathBuf, reason: String },

  /// drift was requested but no tracked packages are configured
  NoTrackedPackages,

  /// Two codebases share the same name
  DuplicateCodebase { name: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => Some("Run `recon init` to generate a fresh recon.toml skeleton.".to_string()),
      ConfigError::NoTrackedPackages => Some(
        "Add a [[tracked]] entry to recon.toml or pass --package (a trailing '*' selects prefix mode, e.g. --package 'firebase*').".to_string(),
      ),
      ConfigError::DuplicateCodebase { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration {}: {}", path.display(), reason)
      }
      ConfigError::NoTrackedPackages => {
        write!(f, "No tracked packages configured")
      }
      ConfigError::DuplicateCodebase { name } => {
        write!(f, "Duplicate codebase name in configuration: '{}'", name)
      }
    }
  }
}

/// Result type alias for recon
pub type ReconResult<T> = Result<T, ReconError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReconResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReconResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReconError>,
{
  fn context(self, ctx: impl Into<String>) -> ReconResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReconResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReconError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
