//! Environment Variable Auditor (C9).
//!
//! Walks a project tree looking for references to environment variables in
//! source files, then cross-checks each reference against the process
//! environment and any declared `.env`-style config files to report which
//! variables are actually missing.

use crate::model::{EcosystemDescriptor, EnvVarReference, EnvVarReport};
use crate::paths;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use walkdir::WalkDir;

const SKIPPED_DIR_NAMES: &[&str] = &["node_modules", ".git", "target", "build"];

const SOURCE_EXTENSIONS: &[&str] = &[
    "go", "java", "js", "ts", "jsx", "tsx", "py", "cpp", "c", "h", "cs",
];

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIR_NAMES.contains(&name))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.as_str()))
}

fn scan_file(
    path: &Path,
    project_root: &Path,
    patterns: &[Regex],
    references: &mut Vec<EnvVarReference>,
) {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return;
    };
    let relative = path.strip_prefix(project_root).unwrap_or(path).to_path_buf();

    for (line_no, line) in contents.lines().enumerate() {
        for pattern in patterns {
            if let Some(captures) = pattern.captures(line) {
                let Some(name) = captures.get(1) else { continue };
                let name = name.as_str().to_string();
                let is_set = std::env::var(&name).is_ok();
                let value = std::env::var(&name).ok();
                references.push(EnvVarReference {
                    name,
                    file: relative.clone(),
                    line: line_no + 1,
                    pattern: pattern.as_str().to_string(),
                    is_set,
                    value,
                });
            }
        }
    }
}

/// Parses a `.env`-style file into a set of declared variable names,
/// ignoring blank lines and `#` comments.
fn parse_config_file(path: &Path) -> HashSet<String> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return HashSet::new();
    };
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            line.split_once('=').map(|(key, _)| key.trim().to_string())
        })
        .collect()
}

/// Audits `project_root` for environment variable references declared by
/// `descriptor.environment`.
pub fn audit_env_vars(descriptor: &EcosystemDescriptor, project_root: &Path) -> EnvVarReport {
    let env = &descriptor.environment;

    let patterns: Vec<Regex> = env
        .variable_patterns
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();

    let mut references = Vec::new();
    if !patterns.is_empty() {
        let walker = WalkDir::new(project_root)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e));
        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && has_source_extension(entry.path()) {
                scan_file(entry.path(), project_root, &patterns, &mut references);
            }
        }
    }

    let mut declared: HashSet<String> = HashSet::new();
    for pattern in &env.config_files {
        for path in paths::glob_matches(project_root, pattern) {
            let is_env_file = path.to_string_lossy().contains(".env")
                || path.extension().and_then(|e| e.to_str()) == Some("env");
            if is_env_file {
                declared.extend(parse_config_file(&path));
            }
        }
    }

    // Only the live process environment can clear a name from `missing`;
    // a `.env` declaration is a statement of intent, not proof the variable
    // is actually set, so a declared-but-unset key is still reported.
    let mut seen_names: HashMap<String, bool> = HashMap::new();
    for reference in &references {
        let settled = reference.is_set;
        seen_names
            .entry(reference.name.clone())
            .and_modify(|v| *v = *v || settled)
            .or_insert(settled);
    }
    for required in &env.required_vars {
        let settled = std::env::var(required).is_ok();
        seen_names.entry(required.clone()).or_insert(settled);
    }
    for name in &declared {
        let settled = std::env::var(name).is_ok();
        seen_names.entry(name.clone()).or_insert(settled);
    }

    let mut missing: Vec<String> = seen_names
        .into_iter()
        .filter(|(_, settled)| !settled)
        .map(|(name, _)| name)
        .collect();
    missing.sort();

    EnvVarReport { references, missing }
}
