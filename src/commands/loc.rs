//! Loc command: per-language line counts
//!
//! Passthrough to tokei when available. The built-in fallback is a rough
//! per-extension counter, good enough for a reconnaissance summary but not a
//! tokei replacement (no comment/blank split).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::Serialize;

use crate::core::error::ReconResult;
use crate::manifest::locator::DEFAULT_EXCLUDES;
use crate::tools;
use crate::utils;

#[derive(Debug, Clone, Serialize)]
struct LocEntry {
  language: String,
  files: usize,
  lines: usize,
}

/// Run the loc command
pub fn run_loc(root: Option<PathBuf>, json: bool) -> ReconResult<()> {
  let root = utils::resolve_root(root)?;
  let root_arg = root.to_string_lossy().to_string();

  if tools::is_available(tools::LOC_COUNTER) {
    let args: Vec<&str> = if json {
      vec!["--output", "json", &root_arg]
    } else {
      vec![&root_arg]
    };

    match tools::passthrough(tools::LOC_COUNTER, &args) {
      Ok(true) => return Ok(()),
      Ok(false) => tools::warn_fallback("tokei exited with an error", "using the built-in counter"),
      Err(err) => tools::warn_fallback(&format!("failed to run tokei: {}", err), "using the built-in counter"),
    }
  } else {
    tools::warn_fallback("tokei not found on PATH", "using the built-in counter");
  }

  let entries = count_lines(&root);
  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
  } else {
    print_loc_table(&entries);
  }

  Ok(())
}

/// Count files and lines per language across the tree
fn count_lines(root: &Path) -> Vec<LocEntry> {
  let mut by_language: BTreeMap<&'static str, (usize, usize)> = BTreeMap::new();

  let walker = WalkBuilder::new(root)
    .standard_filters(true)
    .filter_entry(|entry| {
      if entry.depth() == 0 {
        return true;
      }
      let name = entry.file_name().to_string_lossy();
      let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
      !(is_dir && DEFAULT_EXCLUDES.contains(&name.as_ref()))
    })
    .build();

  for entry in walker.filter_map(|e| e.ok()) {
    if !entry.file_type().is_some_and(|t| t.is_file()) {
      continue;
    }
    let Some(language) = entry
      .path()
      .extension()
      .and_then(|e| e.to_str())
      .and_then(ext_to_lang)
    else {
      continue;
    };
    // Binary or non-UTF-8 files are skipped
    let Ok(content) = std::fs::read_to_string(entry.path()) else {
      continue;
    };

    let counters = by_language.entry(language).or_insert((0, 0));
    counters.0 += 1;
    counters.1 += content.lines().count();
  }

  let mut entries: Vec<LocEntry> = by_language
    .into_iter()
    .map(|(language, (files, lines))| LocEntry {
      language: language.to_string(),
      files,
      lines,
    })
    .collect();
  entries.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.language.cmp(&b.language)));
  entries
}

/// Language name from a file extension
fn ext_to_lang(ext: &str) -> Option<&'static str> {
  match ext.to_ascii_lowercase().as_str() {
    "rs" => Some("rust"),
    "py" => Some("python"),
    "ts" | "tsx" => Some("typescript"),
    "js" | "jsx" | "mjs" => Some("javascript"),
    "go" => Some("go"),
    "java" => Some("java"),
    "kt" => Some("kotlin"),
    "cpp" | "cc" | "cxx" | "hpp" | "hh" => Some("cpp"),
    "c" | "h" => Some("c"),
    "rb" => Some("ruby"),
    "php" => Some("php"),
    "swift" => Some("swift"),
    "dart" => Some("dart"),
    "html" => Some("html"),
    "css" | "scss" => Some("css"),
    "toml" => Some("toml"),
    "yaml" | "yml" => Some("yaml"),
    "json" => Some("json"),
    "md" => Some("markdown"),
    "sh" | "bash" | "zsh" => Some("bash"),
    _ => None,
  }
}

fn print_loc_table(entries: &[LocEntry]) {
  println!("\n📊 Lines of code (built-in counter)\n");
  println!("{:<16} {:>8} {:>10}", "LANGUAGE", "FILES", "LINES");
  println!("{:-<36}", "");

  let mut total_files = 0;
  let mut total_lines = 0;
  for entry in entries {
    println!("{:<16} {:>8} {:>10}", entry.language, entry.files, entry.lines);
    total_files += entry.files;
    total_lines += entry.lines;
  }

  println!("{:-<36}", "");
  println!("{:<16} {:>8} {:>10}", "TOTAL", total_files, total_lines);
}
