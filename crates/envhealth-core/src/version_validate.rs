//! Version Validator (C6).
//!
//! Compares a probed [`VersionInfo`] against a descriptor's
//! [`crate::model::RequirementsSpec`] and produces issues plus concrete
//! remediation suggestions.

use crate::model::{
    EcosystemDescriptor, Issue, IssueKind, Severity, Suggestion, ValidationResult, VersionInfo,
};
use crate::version_probe::{compare, normalize};
use std::cmp::Ordering;

fn version_family(kind: IssueKind) -> bool {
    matches!(
        kind,
        IssueKind::VersionTooOld | IssueKind::VersionTooNew | IssueKind::VersionExcluded
    )
}

fn runtime_family(kind: IssueKind) -> bool {
    matches!(kind, IssueKind::RuntimeExcluded | IssueKind::RuntimeNotPreferred)
}

/// Validates `info` against `descriptor.requirements`.
pub fn validate(descriptor: &EcosystemDescriptor, info: &VersionInfo) -> ValidationResult {
    let req = &descriptor.requirements;
    let mut issues = Vec::new();

    if let Some(min) = &req.min_version {
        if compare(info.normalized, normalize(min)) == Ordering::Less {
            issues.push(Issue::new(
                IssueKind::VersionTooOld,
                Severity::Error,
                format!(
                    "{} version {} is older than the required minimum {}",
                    descriptor.id, info.raw, min
                ),
            ));
        }
    }

    if let Some(max) = &req.max_version {
        if compare(info.normalized, normalize(max)) == Ordering::Greater {
            issues.push(Issue::new(
                IssueKind::VersionTooNew,
                Severity::Error,
                format!(
                    "{} version {} is newer than the allowed maximum {}",
                    descriptor.id, info.raw, max
                ),
            ));
        }
    }

    for excluded in &req.excluded_versions {
        if &info.raw == excluded || info.raw.starts_with(&format!("{excluded}.")) {
            issues.push(Issue::new(
                IssueKind::VersionExcluded,
                Severity::Error,
                format!("{} version {} is explicitly excluded", descriptor.id, info.raw),
            ));
        }
    }

    if let Some(variant) = &info.variant {
        if req
            .excluded_runtimes
            .iter()
            .any(|r| r == &variant.name || r == &variant.provider)
        {
            issues.push(Issue::new(
                IssueKind::RuntimeExcluded,
                Severity::Warning,
                format!("runtime variant {} ({}) is excluded", variant.name, variant.provider),
            ));
        }

        if !req.preferred_runtimes.is_empty()
            && !req
                .preferred_runtimes
                .iter()
                .any(|r| r == &variant.name || r == &variant.provider)
        {
            issues.push(Issue::new(
                IssueKind::RuntimeNotPreferred,
                Severity::Warning,
                format!(
                    "runtime variant {} ({}) is not among the preferred runtimes",
                    variant.name, variant.provider
                ),
            ));
        }
    }

    let suggestions = build_suggestions(descriptor, info, &issues);
    let valid = !issues.iter().any(|i| i.severity == Severity::Error);

    ValidationResult {
        valid,
        issues,
        suggestions,
    }
}

fn build_suggestions(
    descriptor: &EcosystemDescriptor,
    info: &VersionInfo,
    issues: &[Issue],
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let has_version_error = issues
        .iter()
        .any(|i| i.severity == Severity::Error && version_family(i.kind));
    if has_version_error {
        let req = &descriptor.requirements;
        let versions: Vec<String> = if !req.preferred_versions.is_empty() {
            req.preferred_versions.clone()
        } else {
            [req.min_version.clone(), req.max_version.clone()]
                .into_iter()
                .flatten()
                .collect()
        };

        let commands = info
            .version_manager
            .as_ref()
            .and_then(|name| descriptor.version.version_managers.iter().find(|m| &m.name == name))
            .map(|manager| {
                versions
                    .iter()
                    .flat_map(|v| {
                        let mut cmds = Vec::new();
                        if !manager.install_command.is_empty() {
                            cmds.push(manager.install_command.replace("{version}", v));
                        }
                        if !manager.switch_command.is_empty() {
                            cmds.push(manager.switch_command.replace("{version}", v));
                        }
                        cmds
                    })
                    .collect()
            })
            .unwrap_or_default();

        suggestions.push(Suggestion {
            kind: "version".to_string(),
            description: format!("Update {} to a supported version", descriptor.id),
            versions,
            commands,
        });
    }

    let has_runtime_issue = issues.iter().any(|i| runtime_family(i.kind));
    if has_runtime_issue && !descriptor.requirements.preferred_runtimes.is_empty() {
        suggestions.push(Suggestion {
            kind: "runtime".to_string(),
            description: format!(
                "Prefer one of: {}",
                descriptor.requirements.preferred_runtimes.join(", ")
            ),
            versions: descriptor.requirements.preferred_runtimes.clone(),
            commands: Vec::new(),
        });
    }

    suggestions
}
