mod checks;
mod commands;
mod core;
mod drift;
mod manifest;
mod tools;
mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::error::{ReconError, print_error};

/// Project reconnaissance: manifests, health checks, version drift
#[derive(Parser)]
#[command(name = "recon")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct ReconCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Initialize recon.toml configuration for a project root
  Init {
    /// Project root (default: current directory)
    root: Option<PathBuf>,
  },

  /// Run environment and configuration diagnostics
  Doctor {
    /// Project root (default: current directory)
    root: Option<PathBuf>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Core: manifest presence & version drift
  // ============================================================================
  /// Report which dependency manifests each codebase carries
  Health {
    /// Project root (default: current directory)
    root: Option<PathBuf>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Compare tracked package versions across codebases
  #[command(visible_alias = "cross-platform")]
  Drift {
    /// Project root (default: current directory)
    root: Option<PathBuf>,
    /// Tracked package name; a trailing '*' selects prefix mode (e.g. 'firebase*')
    #[arg(short, long = "package")]
    packages: Vec<String>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
    /// Exit non-zero when any tracked package is MISMATCHED
    #[arg(long)]
    strict: bool,
  },

  // ============================================================================
  // Collaborator passthroughs (eza/tree, tokei) with built-in fallbacks
  // ============================================================================
  /// Render a directory tree
  Tree {
    /// Project root (default: current directory)
    root: Option<PathBuf>,
    /// Maximum directory depth to render
    #[arg(short, long, default_value_t = 3)]
    depth: usize,
    /// Output the tree in JSON format (always uses the built-in renderer)
    #[arg(long)]
    json: bool,
  },

  /// Count lines of code per language
  Loc {
    /// Project root (default: current directory)
    root: Option<PathBuf>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = ReconCli::parse();

  let result = match cli.command {
    Commands::Init { root } => commands::run_init(root),
    Commands::Doctor { root, json } => commands::run_doctor(root, json),
    Commands::Health { root, json } => commands::run_health(root, json),
    Commands::Drift {
      root,
      packages,
      json,
      strict,
    } => commands::run_drift(root, packages, json, strict),
    Commands::Tree { root, depth, json } => commands::run_tree(root, depth, json),
    Commands::Loc { root, json } => commands::run_loc(root, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReconError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
