//! Fix Reconciler (C10).
//!
//! Applies a fix command for each fixable [`Issue`], then runs the
//! descriptor's verify command for that issue kind (if any) to confirm the
//! fix actually took. The command comes from the descriptor's `Fix` entry
//! for the issue's kind first, falling back to the command carried on the
//! issue itself; an issue flagged fixable but with no command on either
//! side yields a failed result rather than being skipped.

use crate::model::{EcosystemDescriptor, Issue, ReconciliationReport};
use crate::model::FixResult;
use crate::runner;
use std::path::Path;
use std::time::Duration;

const FIX_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const VERIFY_TIMEOUT: Duration = Duration::from_secs(60);

async fn apply_fix(
    descriptor: &EcosystemDescriptor,
    project_root: &Path,
    issue: &Issue,
    command: String,
) -> FixResult {
    let issue_kind = issue.kind.as_str().to_string();

    let verify_command = descriptor
        .reconciliation
        .fixes
        .get(issue.kind.as_str())
        .and_then(|fix| fix.verify_command.clone());

    match runner::run(&command, project_root, FIX_TIMEOUT).await {
        Ok(output) if output.succeeded() => match verify_command {
            None => FixResult {
                issue_kind,
                command,
                success: true,
                message: "fix applied".to_string(),
                error: None,
            },
            Some(verify) => match runner::run(&verify, project_root, VERIFY_TIMEOUT).await {
                Ok(v) if v.succeeded() => FixResult {
                    issue_kind,
                    command,
                    success: true,
                    message: "fix applied and verified".to_string(),
                    error: None,
                },
                Ok(v) => FixResult {
                    issue_kind,
                    command,
                    success: false,
                    message: "fix verification failed".to_string(),
                    error: Some(v.combined_output.trim().to_string()),
                },
                Err(e) => FixResult {
                    issue_kind,
                    command,
                    success: false,
                    message: "fix verification failed".to_string(),
                    error: Some(e.to_string()),
                },
            },
        },
        Ok(output) => FixResult {
            issue_kind,
            command,
            success: false,
            message: "fix command failed".to_string(),
            error: Some(output.combined_output.trim().to_string()),
        },
        Err(e) => FixResult {
            issue_kind,
            command,
            success: false,
            message: "fix command failed".to_string(),
            error: Some(e.to_string()),
        },
    }
}

/// Applies every fixable issue in `issues` in order, running each fix's
/// verify command where the descriptor declares one.
pub async fn reconcile(
    descriptor: &EcosystemDescriptor,
    project_root: &Path,
    issues: &[Issue],
) -> ReconciliationReport {
    let mut fixed = Vec::new();
    let mut failed = Vec::new();

    for issue in issues {
        if !issue.fix_available {
            continue;
        }

        let issue_kind = issue.kind.as_str().to_string();
        let fix_entry = descriptor.reconciliation.fixes.get(issue.kind.as_str());
        let command = fix_entry
            .map(|fix| fix.command.clone())
            .filter(|c| !c.is_empty())
            .or_else(|| (!issue.fix_command.is_empty()).then(|| issue.fix_command.clone()));

        let command = match command {
            Some(command) => command,
            None => {
                let message = if fix_entry.is_none() {
                    "No fix available for this issue type"
                } else {
                    "No fix command available"
                };
                failed.push(FixResult {
                    issue_kind,
                    command: String::new(),
                    success: false,
                    message: message.to_string(),
                    error: None,
                });
                continue;
            }
        };

        let result = apply_fix(descriptor, project_root, issue, command).await;
        if result.success {
            fixed.push(result);
        } else {
            failed.push(result);
        }
    }

    ReconciliationReport { fixed, failed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DescriptorFile, IssueKind, Severity};
    use tempfile::tempdir;

    fn descriptor(yaml: &str) -> EcosystemDescriptor {
        let file: DescriptorFile = serde_yaml::from_str(yaml).unwrap();
        file.ecosystem
    }

    const DESCRIPTOR: &str = r#"
ecosystem:
  id: java-maven
  manifest:
    primary_file: pom.xml
  reconciliation:
    fixes:
      stale_build:
        command: "true"
        verify_command: "true"
      missing_target:
        command: "false"
"#;

    #[tokio::test]
    async fn test_fix_applied_and_verified() {
        let descriptor = descriptor(DESCRIPTOR);
        let dir = tempdir().unwrap();
        let issues = vec![Issue::new(IssueKind::StaleBuild, Severity::Error, "stale").with_fix("true")];
        let report = reconcile(&descriptor, dir.path(), &issues).await;
        assert_eq!(report.fixed.len(), 1);
        assert!(report.failed.is_empty());
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_fix_command_fails() {
        let descriptor = descriptor(DESCRIPTOR);
        let dir = tempdir().unwrap();
        let issues = vec![Issue::new(IssueKind::MissingTarget, Severity::Warning, "missing").with_fix("false")];
        let report = reconcile(&descriptor, dir.path(), &issues).await;
        assert!(report.fixed.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_verify_failure_marks_fix_as_failed() {
        let yaml = r#"
ecosystem:
  id: java-maven
  manifest:
    primary_file: pom.xml
  reconciliation:
    fixes:
      stale_build:
        command: "true"
        verify_command: "false"
"#;
        let descriptor = descriptor(yaml);
        let dir = tempdir().unwrap();
        let issues = vec![Issue::new(IssueKind::StaleBuild, Severity::Error, "stale").with_fix("true")];
        let report = reconcile(&descriptor, dir.path(), &issues).await;
        assert!(report.fixed.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].message, "fix verification failed");
    }

    #[tokio::test]
    async fn test_unfixable_issue_is_skipped() {
        let descriptor = descriptor(DESCRIPTOR);
        let dir = tempdir().unwrap();
        let issues = vec![Issue::new(IssueKind::VersionTooOld, Severity::Error, "old")];
        let report = reconcile(&descriptor, dir.path(), &issues).await;
        assert!(report.fixed.is_empty());
        assert!(report.failed.is_empty());
    }

    #[tokio::test]
    async fn test_every_fixable_issue_yields_exactly_one_result() {
        let descriptor = descriptor(DESCRIPTOR);
        let dir = tempdir().unwrap();
        let issues = vec![
            Issue::new(IssueKind::StaleBuild, Severity::Error, "stale").with_fix("true"),
            Issue::new(IssueKind::MissingTarget, Severity::Warning, "missing").with_fix("false"),
            Issue::new(IssueKind::VersionTooOld, Severity::Error, "old"),
        ];
        let fixable_count = issues.iter().filter(|i| i.fix_available).count();
        let report = reconcile(&descriptor, dir.path(), &issues).await;
        assert_eq!(report.fixed.len() + report.failed.len(), fixable_count);
    }

    #[tokio::test]
    async fn test_fix_available_with_no_resolvable_command_is_failed_not_skipped() {
        let descriptor = descriptor(DESCRIPTOR);
        let dir = tempdir().unwrap();
        let mut issue = Issue::new(IssueKind::VersionTooOld, Severity::Error, "old");
        issue.fix_available = true;
        let issues = vec![issue];

        let report = reconcile(&descriptor, dir.path(), &issues).await;
        assert!(report.fixed.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].message, "No fix available for this issue type");
    }

    #[tokio::test]
    async fn test_map_command_takes_precedence_over_issue_fix_command() {
        let descriptor = descriptor(DESCRIPTOR);
        let dir = tempdir().unwrap();
        let issues =
            vec![Issue::new(IssueKind::StaleBuild, Severity::Error, "stale").with_fix("false")];
        let report = reconcile(&descriptor, dir.path(), &issues).await;
        assert_eq!(report.fixed.len(), 1);
        assert_eq!(report.fixed[0].command, "true");
    }

    #[test]
    fn test_summary_format() {
        let report = ReconciliationReport {
            fixed: vec![FixResult {
                issue_kind: "stale_build".into(),
                command: "true".into(),
                success: true,
                message: "fix applied".into(),
                error: None,
            }],
            failed: vec![],
        };
        assert_eq!(report.summary(), "1 fixed, 0 failed");
    }
}
