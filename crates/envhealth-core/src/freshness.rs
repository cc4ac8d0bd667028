//! Freshness Verifier (C7).
//!
//! Evaluates each `timestamp_compare` check declared by a descriptor,
//! comparing the manifest's mtime against a fixed target or the newest
//! match of a glob. Checks run in declaration order and issues are
//! reported in that same order; a check whose source file is missing is
//! logged and skipped rather than treated as a report-level failure.

use crate::model::{CheckKind, EcosystemDescriptor, FreshnessReport, Issue, IssueKind, Severity};
use crate::paths;
use std::path::Path;

fn fix_command(descriptor: &EcosystemDescriptor, kind: IssueKind) -> String {
    descriptor
        .reconciliation
        .fixes
        .get(kind.as_str())
        .map(|f| f.command.clone())
        .unwrap_or_default()
}

/// Verifies build freshness for one detected ecosystem.
pub fn verify_build_freshness(descriptor: &EcosystemDescriptor, project_root: &Path) -> FreshnessReport {
    let mut issues = Vec::new();

    for check in &descriptor.verification.build_freshness.commands {
        if check.kind != CheckKind::TimestampCompare {
            continue;
        }

        let source = paths::resolve(project_root, &check.source);
        if !paths::exists(&source) {
            tracing::warn!(
                check = %check.name,
                source = %source.display(),
                "freshness check source missing, skipping"
            );
            continue;
        }
        let Some(source_mtime) = paths::mtime(&source) else {
            tracing::warn!(check = %check.name, "could not read source mtime, skipping");
            continue;
        };

        if let Some(target) = &check.target {
            let target_path = paths::resolve(project_root, target);
            if !paths::exists(&target_path) {
                issues.push(Issue::new(
                    IssueKind::MissingTarget,
                    Severity::Warning,
                    format!("{}: build output {} does not exist", check.name, target),
                ));
                continue;
            }
            if let Some(target_mtime) = paths::mtime(&target_path) {
                if source_mtime > target_mtime {
                    issues.push(
                        Issue::new(
                            IssueKind::StaleBuild,
                            Severity::Error,
                            format!(
                                "{}: {} is newer than build output {}",
                                check.name, check.source, target
                            ),
                        )
                        .with_fix(fix_command(descriptor, IssueKind::StaleBuild)),
                    );
                }
            }
        } else if let Some(pattern) = &check.target_pattern {
            let matches = paths::glob_matches(project_root, pattern);
            match paths::newest(&matches) {
                None => {
                    issues.push(Issue::new(
                        IssueKind::MissingBuildOutput,
                        Severity::Warning,
                        format!("{}: no build output matches {}", check.name, pattern),
                    ));
                }
                Some(newest) => {
                    if let Some(newest_mtime) = paths::mtime(newest) {
                        if source_mtime > newest_mtime {
                            let relative = newest
                                .strip_prefix(project_root)
                                .unwrap_or(newest)
                                .display();
                            issues.push(
                                Issue::new(
                                    IssueKind::StaleBuild,
                                    Severity::Error,
                                    format!(
                                        "{}: {} is newer than build output {}",
                                        check.name, check.source, relative
                                    ),
                                )
                                .with_fix(fix_command(descriptor, IssueKind::StaleBuild)),
                            );
                        }
                    }
                }
            }
        }
    }

    FreshnessReport {
        ecosystem_id: descriptor.id.clone(),
        issues,
    }
}
