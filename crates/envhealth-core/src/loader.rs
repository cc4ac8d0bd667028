//! Ecosystem Descriptor Loader (C2).
//!
//! Discovers and parses YAML descriptors from a directory tree. All
//! language- and tool-specific knowledge enters the engine through this
//! module; the rest of the crate never references a concrete ecosystem.

use crate::error::{EngineError, Result};
use crate::model::EcosystemDescriptor;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

fn has_yaml_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()),
        Some(ref ext) if ext == "yaml" || ext == "yml"
    )
}

fn walk_recursive(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && has_yaml_extension(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn list_flat(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_yaml_extension(p))
        .collect()
}

/// Walks `base` per the loader's discovery policy (§4.1) and returns every
/// candidate descriptor file, in a stable order.
fn discover_files(base: &Path) -> Vec<PathBuf> {
    let modern_root = base.join("config");
    if modern_root.is_dir() {
        let mut files = walk_recursive(&modern_root.join("languages"));
        files.extend(walk_recursive(&modern_root.join("infrastructure")));
        files.sort();
        return files;
    }

    let legacy_languages = base.join("language-configs");
    let legacy_tools = base.join("tool-configs");
    if legacy_languages.is_dir() || legacy_tools.is_dir() {
        let mut files = list_flat(&legacy_languages);
        files.extend(walk_recursive(&legacy_tools));
        files.sort();
        return files;
    }

    let mut files = list_flat(base);
    files.sort();
    files
}

/// Parses one descriptor file. Returns `None` (rather than an error) for
/// anything that fails to parse or fails validation — discovery never
/// aborts on a single bad file.
fn load_one(path: &Path) -> Option<EcosystemDescriptor> {
    let contents = std::fs::read_to_string(path)
        .inspect_err(|e| tracing::warn!(path = %path.display(), error = %e, "failed to read descriptor"))
        .ok()?;
    let file: crate::model::DescriptorFile = serde_yaml::from_str(&contents)
        .inspect_err(|e| tracing::warn!(path = %path.display(), error = %e, "failed to parse descriptor"))
        .ok()?;
    if !file.ecosystem.is_valid() {
        tracing::warn!(path = %path.display(), id = %file.ecosystem.id, "descriptor failed validation, skipping");
        return None;
    }
    Some(file.ecosystem)
}

/// Loads every valid, non-duplicate descriptor under `base`.
///
/// `base` itself must exist; individual missing/unreadable subdirectories
/// just yield no files for that layout tier. Duplicate `id`s: the first
/// one discovered wins, later ones are dropped silently.
pub fn load_descriptors(base: &Path) -> Result<Vec<EcosystemDescriptor>> {
    if !base.is_dir() {
        return Err(EngineError::DescriptorRootNotFound(
            base.display().to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut descriptors = Vec::new();
    for path in discover_files(base) {
        let Some(descriptor) = load_one(&path) else {
            continue;
        };
        if seen_ids.insert(descriptor.id.clone()) {
            descriptors.push(descriptor);
        } else {
            tracing::debug!(id = %descriptor.id, path = %path.display(), "duplicate descriptor id, dropped");
        }
    }
    Ok(descriptors)
}
