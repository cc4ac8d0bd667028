//! Version Probe (C5).
//!
//! Runs a descriptor's version-probe command, extracts and normalizes the
//! reported version, and identifies an active runtime variant and version
//! manager if the descriptor declares any.

use crate::error::{EngineError, Result};
use crate::model::{EcosystemDescriptor, RuntimeVariantInfo, VersionInfo};
use crate::runner;
use regex::Regex;
use std::path::Path;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const MANAGER_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

fn leading_number(s: &str) -> u64 {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Splits a raw version string into a `(major, minor, patch)` triple.
/// Missing components default to zero; any `+…`/`-…` suffix on the third
/// component is stripped; non-numeric segments count as zero.
///
/// # Examples
///
/// ```
/// use envhealth_core::version_probe::normalize;
///
/// assert_eq!(normalize("17"), (17, 0, 0));
/// assert_eq!(normalize("8.0.352"), (8, 0, 352));
/// assert_eq!(normalize("1.2.3-beta"), (1, 2, 3));
/// ```
pub fn normalize(raw: &str) -> (u64, u64, u64) {
    let mut comps: Vec<&str> = raw.split('.').collect();
    while comps.len() < 3 {
        comps.push("0");
    }
    let major = leading_number(comps[0]);
    let minor = leading_number(comps[1]);
    let patch_component = comps[2].split(['+', '-']).next().unwrap_or(comps[2]);
    let patch = leading_number(patch_component);
    (major, minor, patch)
}

/// Total order over normalized triples, also usable directly on
/// un-normalized strings by normalizing both sides first.
pub fn compare(a: (u64, u64, u64), b: (u64, u64, u64)) -> std::cmp::Ordering {
    a.cmp(&b)
}

fn detect_variant(descriptor: &EcosystemDescriptor, probe_output: &str) -> Option<RuntimeVariantInfo> {
    for variant in &descriptor.version.runtime_variants {
        if let Ok(re) = Regex::new(&variant.pattern) {
            if re.is_match(probe_output) {
                return Some(RuntimeVariantInfo {
                    name: variant.name.clone(),
                    provider: variant.provider.clone(),
                });
            }
        }
    }

    if let Some(pattern) = &descriptor.version.runtime_pattern {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(captures) = re.captures(probe_output) {
                if let Some(m) = captures.get(1) {
                    return Some(RuntimeVariantInfo {
                        name: m.as_str().to_string(),
                        provider: "Unknown".to_string(),
                    });
                }
            }
        }
    }

    None
}

async fn detect_version_manager(descriptor: &EcosystemDescriptor, project_root: &Path) -> Option<String> {
    for manager in &descriptor.version.version_managers {
        let output = runner::run(&manager.check_command, project_root, MANAGER_CHECK_TIMEOUT).await;
        if matches!(output, Ok(ref o) if o.succeeded()) {
            return Some(manager.name.clone());
        }
    }
    None
}

/// Runs the descriptor's version probe and returns a fully populated
/// [`VersionInfo`].
pub async fn probe(descriptor: &EcosystemDescriptor, project_root: &Path) -> Result<VersionInfo> {
    let output = runner::run(&descriptor.version.version_command, project_root, PROBE_TIMEOUT).await?;
    let trimmed = output.combined_output.trim().to_string();

    let pattern = Regex::new(&descriptor.version.version_pattern).map_err(EngineError::InvalidRegex)?;
    let raw = pattern
        .captures(&trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(EngineError::UnparsableVersion)?;

    let normalized = normalize(&raw);
    let variant = detect_variant(descriptor, &trimmed);
    let version_manager = detect_version_manager(descriptor, project_root).await;

    Ok(VersionInfo {
        language: descriptor.id.clone(),
        raw,
        normalized,
        variant,
        version_manager,
    })
}
