//! Format-aware version extraction rules
//!
//! One rule per recognized manifest format, behind a common trait: adding a
//! new format means adding one rule here, nothing else. Structured formats
//! (JSON, TOML, YAML) use key lookup; line-oriented formats
//! (requirements.txt, yarn.lock) use line patterns.
//!
//! When a prefix family matches several entries in one manifest, the
//! lexically-first entry wins. Selection over identically-named ties is
//! non-deterministic by construction; that limitation is accepted, not
//! masked.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use toml_edit::DocumentMut;

use crate::drift::tracked::TrackedPackage;
use crate::manifest::format::ManifestFormat;

/// A matched manifest entry: the concrete package name and its raw declared
/// version string (no semver normalization)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundEntry {
  pub name: String,
  pub version: String,
}

/// A manifest that exists but cannot be parsed as its declared format
#[derive(Debug, Clone)]
pub struct ParseFailure {
  pub message: String,
}

impl ParseFailure {
  fn new(err: impl ToString) -> Self {
    Self {
      message: err.to_string(),
    }
  }
}

impl std::fmt::Display for ParseFailure {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.message)
  }
}

/// Extraction rule for one manifest format
pub trait ExtractionRule: Sync {
  /// Extract the declared version of a tracked package from manifest text
  ///
  /// `Ok(None)` means the package is simply not declared; a `ParseFailure`
  /// means the file could not be read as its format at all.
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure>;
}

/// Look up the rule for a format
pub fn rule_for(format: ManifestFormat) -> &'static dyn ExtractionRule {
  match format {
    ManifestFormat::PackageJson => &PackageJsonRule,
    ManifestFormat::ComposerJson => &ComposerJsonRule,
    ManifestFormat::CargoToml => &CargoTomlRule,
    ManifestFormat::Pipfile => &PipfileRule,
    ManifestFormat::PubspecYaml => &PubspecYamlRule,
    ManifestFormat::PnpmLock => &PnpmLockRule,
    ManifestFormat::YarnLock => &YarnLockRule,
    ManifestFormat::RequirementsTxt => &RequirementsTxtRule,
  }
}

/// Lexically-first candidate by package name
fn pick(mut candidates: Vec<FoundEntry>) -> Option<FoundEntry> {
  candidates.sort_by(|a, b| a.name.cmp(&b.name));
  candidates.into_iter().next()
}

fn json_candidates(value: &JsonValue, sections: &[&str], package: &TrackedPackage) -> Vec<FoundEntry> {
  let mut candidates = Vec::new();
  for section in sections {
    if let Some(map) = value.get(section).and_then(|v| v.as_object()) {
      for (name, version) in map {
        if package.matches(name)
          && let Some(version) = version.as_str()
        {
          candidates.push(FoundEntry {
            name: name.clone(),
            version: version.to_string(),
          });
        }
      }
    }
  }
  candidates
}

/// Version of a TOML dependency item: either `dep = "1.0"` or a table with a
/// `version` key (`dep = { version = "1.0", features = [...] }`)
fn toml_item_version(item: &toml_edit::Item) -> Option<String> {
  if let Some(version) = item.as_str() {
    return Some(version.to_string());
  }
  item
    .as_table_like()
    .and_then(|table| table.get("version"))
    .and_then(|v| v.as_str())
    .map(str::to_string)
}

fn toml_candidates(doc: &DocumentMut, package: &TrackedPackage, sections: &[&str]) -> Vec<FoundEntry> {
  let mut candidates = Vec::new();
  let mut tables: Vec<&dyn toml_edit::TableLike> = Vec::new();

  for &section in sections {
    if let Some(table) = doc.get(section).and_then(|i| i.as_table_like()) {
      tables.push(table);
    }
  }
  // Cargo workspaces declare shared versions under [workspace.dependencies]
  if let Some(table) = doc
    .get("workspace")
    .and_then(|w| w.as_table_like())
    .and_then(|w| w.get("dependencies"))
    .and_then(|d| d.as_table_like())
  {
    tables.push(table);
  }

  for table in tables {
    for (name, item) in table.iter() {
      if package.matches(name)
        && let Some(version) = toml_item_version(item)
      {
        candidates.push(FoundEntry {
          name: name.to_string(),
          version,
        });
      }
    }
  }
  candidates
}

fn yaml_map_candidates(value: Option<&YamlValue>, package: &TrackedPackage, out: &mut Vec<FoundEntry>) {
  let Some(map) = value.and_then(|v| v.as_mapping()) else {
    return;
  };
  for (key, entry) in map {
    let Some(name) = key.as_str() else { continue };
    if !package.matches(name) {
      continue;
    }
    // Entries are either plain version strings or maps carrying a version
    // (hosted deps); git/sdk/path deps declare no version and are skipped
    let version = match entry {
      YamlValue::String(s) => Some(s.clone()),
      YamlValue::Number(n) => Some(n.to_string()),
      YamlValue::Mapping(_) => entry
        .get("version")
        .or_else(|| entry.get("specifier"))
        .and_then(|v| v.as_str())
        .map(str::to_string),
      _ => None,
    };
    if let Some(version) = version {
      out.push(FoundEntry {
        name: name.to_string(),
        version,
      });
    }
  }
}

// ---------------------------------------------------------------------------
// npm: package.json
// ---------------------------------------------------------------------------

struct PackageJsonRule;

impl ExtractionRule for PackageJsonRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let value: JsonValue = serde_json::from_str(content).map_err(ParseFailure::new)?;
    Ok(pick(json_candidates(
      &value,
      &["dependencies", "devDependencies", "peerDependencies"],
      package,
    )))
  }
}

// ---------------------------------------------------------------------------
// composer: composer.json
// ---------------------------------------------------------------------------

struct ComposerJsonRule;

impl ExtractionRule for ComposerJsonRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let value: JsonValue = serde_json::from_str(content).map_err(ParseFailure::new)?;
    Ok(pick(json_candidates(&value, &["require", "require-dev"], package)))
  }
}

// ---------------------------------------------------------------------------
// cargo: Cargo.toml
// ---------------------------------------------------------------------------

struct CargoTomlRule;

impl ExtractionRule for CargoTomlRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let doc: DocumentMut = content.parse().map_err(ParseFailure::new)?;
    Ok(pick(toml_candidates(
      &doc,
      package,
      &["dependencies", "dev-dependencies", "build-dependencies"],
    )))
  }
}

// ---------------------------------------------------------------------------
// python: Pipfile (TOML)
// ---------------------------------------------------------------------------

struct PipfileRule;

impl ExtractionRule for PipfileRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let doc: DocumentMut = content.parse().map_err(ParseFailure::new)?;
    Ok(pick(toml_candidates(&doc, package, &["packages", "dev-packages"])))
  }
}

// ---------------------------------------------------------------------------
// pub: pubspec.yaml
// ---------------------------------------------------------------------------

struct PubspecYamlRule;

impl ExtractionRule for PubspecYamlRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let value: YamlValue = serde_yaml::from_str(content).map_err(ParseFailure::new)?;
    let mut candidates = Vec::new();
    yaml_map_candidates(value.get("dependencies"), package, &mut candidates);
    yaml_map_candidates(value.get("dev_dependencies"), package, &mut candidates);
    Ok(pick(candidates))
  }
}

// ---------------------------------------------------------------------------
// npm: pnpm-lock.yaml
// ---------------------------------------------------------------------------

struct PnpmLockRule;

impl ExtractionRule for PnpmLockRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let value: YamlValue = serde_yaml::from_str(content).map_err(ParseFailure::new)?;
    let mut candidates = Vec::new();

    // Lockfile v6 keeps dependencies at the root; v9 nests them per importer
    yaml_map_candidates(value.get("dependencies"), package, &mut candidates);
    yaml_map_candidates(value.get("devDependencies"), package, &mut candidates);
    if let Some(importers) = value.get("importers").and_then(|v| v.as_mapping()) {
      for (_, importer) in importers {
        yaml_map_candidates(importer.get("dependencies"), package, &mut candidates);
        yaml_map_candidates(importer.get("devDependencies"), package, &mut candidates);
      }
    }

    Ok(pick(candidates))
  }
}

// ---------------------------------------------------------------------------
// npm: yarn.lock (line-oriented)
// ---------------------------------------------------------------------------

struct YarnLockRule;

impl YarnLockRule {
  /// Package name of one header spec: everything before the last '@'
  /// ("firebase@^10.1.0", "@scope/pkg@npm:1.2.3")
  fn spec_name(spec: &str) -> Option<&str> {
    let at = spec.rfind('@')?;
    if at == 0 {
      return None;
    }
    Some(&spec[..at])
  }

  /// Scan the indented block following a header for its version line
  fn block_version(rest: &[&str]) -> Option<String> {
    for line in rest {
      if !line.starts_with(' ') && !line.starts_with('\t') {
        return None; // next block reached
      }
      let trimmed = line.trim();
      if let Some(value) = trimmed.strip_prefix("version") {
        let value = value.trim_start_matches(':').trim();
        return Some(value.trim_matches('"').to_string());
      }
    }
    None
  }
}

impl ExtractionRule for YarnLockRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let lines: Vec<&str> = content.lines().collect();
    let mut candidates = Vec::new();

    for (i, line) in lines.iter().enumerate() {
      if line.is_empty() || line.starts_with('#') || line.starts_with(char::is_whitespace) {
        continue;
      }
      let Some(header) = line.trim_end().strip_suffix(':') else {
        continue;
      };

      for spec in header.split(',') {
        let spec = spec.trim().trim_matches('"');
        let Some(name) = Self::spec_name(spec) else { continue };
        if package.matches(name) {
          if let Some(version) = Self::block_version(&lines[i + 1..]) {
            candidates.push(FoundEntry {
              name: name.to_string(),
              version,
            });
          }
          break; // one candidate per block
        }
      }
    }

    Ok(pick(candidates))
  }
}

// ---------------------------------------------------------------------------
// python: requirements.txt (line-oriented)
// ---------------------------------------------------------------------------

struct RequirementsTxtRule;

impl RequirementsTxtRule {
  /// Parse one requirement line into (name, raw version string)
  ///
  /// `name==1.2.3` yields "1.2.3"; any other specifier is kept verbatim
  /// (">=2.0,<3.0"); a bare name yields "*". Comment lines, blank lines and
  /// pip options (-r, -e, --hash) are skipped.
  fn parse_line(line: &str) -> Option<(&str, String)> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() || line.starts_with('-') {
      return None;
    }

    let name_end = line
      .find(['[', '<', '>', '=', '!', '~', ';', ' '])
      .unwrap_or(line.len());
    let name = &line[..name_end];
    if name.is_empty() {
      return None;
    }

    let mut rest = &line[name_end..];
    if rest.starts_with('[') {
      rest = rest.split_once(']').map(|(_, tail)| tail).unwrap_or("");
    }
    let spec = rest.split(';').next().unwrap_or("").trim();

    let version = match spec.strip_prefix("==") {
      Some(pinned) => pinned.trim().to_string(),
      None if spec.is_empty() => "*".to_string(),
      None => spec.replace(' ', ""),
    };
    Some((name, version))
  }
}

impl ExtractionRule for RequirementsTxtRule {
  fn extract(&self, content: &str, package: &TrackedPackage) -> Result<Option<FoundEntry>, ParseFailure> {
    let mut candidates = Vec::new();
    for line in content.lines() {
      if let Some((name, version)) = Self::parse_line(line)
        && package.matches(name)
      {
        candidates.push(FoundEntry {
          name: name.to_string(),
          version,
        });
      }
    }
    Ok(pick(candidates))
  }
}
