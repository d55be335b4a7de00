//! Tree command: directory tree rendering
//!
//! Passthrough to eza or tree when available; otherwise a built-in renderer.
//! Structured output always uses the built-in renderer, because the
//! collaborators disagree on JSON shape (eza has none at all).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::error::ReconResult;
use crate::manifest::locator::DEFAULT_EXCLUDES;
use crate::tools;
use crate::utils;

#[derive(Debug, Clone, Serialize)]
struct TreeNode {
  name: String,
  #[serde(rename = "type")]
  kind: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  children: Option<Vec<TreeNode>>,
}

/// Run the tree command
pub fn run_tree(root: Option<PathBuf>, depth: usize, json: bool) -> ReconResult<()> {
  let root = utils::resolve_root(root)?;

  if json {
    let node = build_node(&root, root_label(&root), depth);
    println!("{}", serde_json::to_string_pretty(&node)?);
    return Ok(());
  }

  if let Some(tool) = tools::find_tool(tools::TREE_RENDERERS) {
    let level = depth.to_string();
    let root_arg = root.to_string_lossy().to_string();
    let args: Vec<&str> = match tool {
      "eza" => vec!["--tree", "--level", &level, &root_arg],
      _ => vec!["-L", &level, &root_arg],
    };

    match tools::passthrough(tool, &args) {
      Ok(true) => return Ok(()),
      Ok(false) => tools::warn_fallback(
        &format!("{} exited with an error", tool),
        "using the built-in renderer",
      ),
      Err(err) => tools::warn_fallback(
        &format!("failed to run {}: {}", tool, err),
        "using the built-in renderer",
      ),
    }
  } else {
    tools::warn_fallback("no tree renderer (eza/tree) on PATH", "using the built-in renderer");
  }

  let node = build_node(&root, root_label(&root), depth);
  println!("{}", node.name);
  if let Some(children) = &node.children {
    print_children(children, "");
  }

  Ok(())
}

fn root_label(root: &Path) -> String {
  root
    .file_name()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|| ".".to_string())
}

/// Build the tree, skipping hidden entries and dependency/build directories
fn build_node(path: &Path, name: String, depth_left: usize) -> TreeNode {
  if !path.is_dir() {
    return TreeNode {
      name,
      kind: "file",
      children: None,
    };
  }
  if depth_left == 0 {
    return TreeNode {
      name,
      kind: "dir",
      children: None,
    };
  }

  // Unreadable subdirectories render as leaves rather than failing the run
  let Ok(read) = std::fs::read_dir(path) else {
    return TreeNode {
      name,
      kind: "dir",
      children: None,
    };
  };

  let mut entries: Vec<(String, PathBuf)> = read
    .filter_map(|e| e.ok())
    .filter_map(|e| {
      let entry_name = e.file_name().to_string_lossy().into_owned();
      if entry_name.starts_with('.') || DEFAULT_EXCLUDES.contains(&entry_name.as_str()) {
        None
      } else {
        Some((entry_name, e.path()))
      }
    })
    .collect();
  entries.sort_by(|a, b| a.0.cmp(&b.0));

  let children = entries
    .into_iter()
    .map(|(entry_name, entry_path)| build_node(&entry_path, entry_name, depth_left - 1))
    .collect();

  TreeNode {
    name,
    kind: "dir",
    children: Some(children),
  }
}

fn print_children(children: &[TreeNode], prefix: &str) {
  let last = children.len().saturating_sub(1);
  for (i, child) in children.iter().enumerate() {
    let connector = if i == last { "└── " } else { "├── " };
    println!("{}{}{}", prefix, connector, child.name);

    if let Some(grandchildren) = &child.children {
      let next_prefix = format!("{}{}", prefix, if i == last { "    " } else { "│   " });
      print_children(grandchildren, &next_prefix);
    }
  }
}
