//! The descriptor schema and the per-request report types produced by the
//! diagnostic components.
//!
//! Descriptors are loaded once (see [`crate::loader`]) and kept for the
//! process lifetime; every other type here is created fresh per request and
//! discarded once a response is encoded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level shape of one descriptor YAML file: a single `ecosystem:` key.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorFile {
    pub ecosystem: EcosystemDescriptor,
}

/// One language/toolchain profile, fully described by YAML. The engine
/// itself holds no language-specific knowledge beyond this schema.
#[derive(Debug, Clone, Deserialize)]
pub struct EcosystemDescriptor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub manifest: ManifestSpec,
    #[serde(default)]
    pub detection: DetectionSpec,
    #[serde(default)]
    pub verification: VerificationSpec,
    #[serde(default)]
    pub version: VersionSpec,
    #[serde(default)]
    pub requirements: RequirementsSpec,
    #[serde(default)]
    pub infrastructure: InfrastructureSpec,
    #[serde(default)]
    pub environment: EnvironmentSpec,
    #[serde(default)]
    pub reconciliation: ReconciliationSpec,
}

impl EcosystemDescriptor {
    /// A descriptor is valid iff `id` and `manifest.primary_file` are
    /// non-empty; this is the only load-time validation performed,
    /// deliberately, so a single bad regex elsewhere cannot block startup.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.manifest.primary_file.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestSpec {
    pub primary_file: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectionSpec {
    #[serde(default)]
    pub required_files: Vec<String>,
    #[serde(default)]
    pub optional_files: Vec<String>,
    #[serde(default)]
    pub directory_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationSpec {
    #[serde(default)]
    pub build_freshness: BuildFreshnessSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildFreshnessSpec {
    #[serde(default)]
    pub commands: Vec<FreshnessCheck>,
}

/// One freshness check declared in a descriptor.
///
/// `kind` is an open string: `timestamp_compare` is the only kind the
/// verifier acts on, everything else is accepted at load time and ignored
/// at evaluation time (future-compat for `command`, `file_exists`,
/// `version_check`).
#[derive(Debug, Clone, Deserialize)]
pub struct FreshnessCheck {
    pub name: String,
    pub kind: CheckKind,
    pub source: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub target_pattern: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    TimestampCompare,
    /// Any other declared kind; evaluated as a no-op.
    Other(String),
}

impl<'de> Deserialize<'de> for CheckKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "timestamp_compare" => CheckKind::TimestampCompare,
            _ => CheckKind::Other(raw),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionSpec {
    #[serde(default)]
    pub version_command: String,
    #[serde(default)]
    pub version_pattern: String,
    #[serde(default)]
    pub runtime_pattern: Option<String>,
    #[serde(default)]
    pub runtime_variants: Vec<RuntimeVariantSpec>,
    #[serde(default)]
    pub version_managers: Vec<VersionManagerSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeVariantSpec {
    pub name: String,
    pub provider: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionManagerSpec {
    pub name: String,
    pub check_command: String,
    #[serde(default)]
    pub install_command: String,
    #[serde(default)]
    pub switch_command: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequirementsSpec {
    #[serde(default)]
    pub min_version: Option<String>,
    #[serde(default)]
    pub max_version: Option<String>,
    #[serde(default)]
    pub excluded_versions: Vec<String>,
    #[serde(default)]
    pub preferred_versions: Vec<String>,
    #[serde(default)]
    pub preferred_runtimes: Vec<String>,
    #[serde(default)]
    pub excluded_runtimes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfrastructureSpec {
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    pub check_command: String,
    #[serde(default)]
    pub version_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentSpec {
    #[serde(default)]
    pub variable_patterns: Vec<String>,
    #[serde(default)]
    pub config_files: Vec<String>,
    #[serde(default)]
    pub required_vars: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconciliationSpec {
    #[serde(default)]
    pub fixes: HashMap<String, FixSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixSpec {
    pub command: String,
    #[serde(default)]
    pub verify_command: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// A descriptor matched against one project root, with its confidence.
#[derive(Debug, Clone)]
pub struct DetectedEcosystem {
    pub descriptor: Arc<EcosystemDescriptor>,
    pub project_root: PathBuf,
    pub confidence: f64,
}

/// The fixed set of issue kinds the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    StaleBuild,
    MissingTarget,
    MissingBuildOutput,
    VersionTooOld,
    VersionTooNew,
    VersionExcluded,
    RuntimeExcluded,
    RuntimeNotPreferred,
    MissingEnvVar,
}

impl IssueKind {
    /// The canonical string form, used as the `fixes` map key and in
    /// serialized reports.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::StaleBuild => "stale_build",
            IssueKind::MissingTarget => "missing_target",
            IssueKind::MissingBuildOutput => "missing_build_output",
            IssueKind::VersionTooOld => "version_too_old",
            IssueKind::VersionTooNew => "version_too_new",
            IssueKind::VersionExcluded => "version_excluded",
            IssueKind::RuntimeExcluded => "runtime_excluded",
            IssueKind::RuntimeNotPreferred => "runtime_not_preferred",
            IssueKind::MissingEnvVar => "missing_env_var",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One problem surfaced by any checker, denormalized with its own fix
/// command so the reconciler does not need to re-derive it.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    pub fix_available: bool,
    #[serde(default)]
    pub fix_command: String,
}

impl Issue {
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            fix_available: false,
            fix_command: String::new(),
        }
    }

    pub fn with_fix(mut self, command: impl Into<String>) -> Self {
        let command = command.into();
        if !command.is_empty() {
            self.fix_available = true;
            self.fix_command = command;
        }
        self
    }
}

/// Result of [`crate::freshness::verify_build_freshness`] for one ecosystem.
#[derive(Debug, Clone, Serialize)]
pub struct FreshnessReport {
    pub ecosystem_id: String,
    pub issues: Vec<Issue>,
}

impl FreshnessReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeVariantInfo {
    pub name: String,
    pub provider: String,
}

/// Normalized outcome of a version probe.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub language: String,
    pub raw: String,
    pub normalized: (u64, u64, u64),
    pub variant: Option<RuntimeVariantInfo>,
    pub version_manager: Option<String>,
}

/// A suggested remediation for a version or runtime issue.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub kind: String,
    pub description: String,
    pub versions: Vec<String>,
    pub commands: Vec<String>,
}

/// Outcome of validating a [`VersionInfo`] against a descriptor's
/// [`RequirementsSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
}

/// One reference to an environment variable found in source.
#[derive(Debug, Clone, Serialize)]
pub struct EnvVarReference {
    pub name: String,
    pub file: PathBuf,
    pub line: usize,
    pub pattern: String,
    pub is_set: bool,
    pub value: Option<String>,
}

/// Full result of [`crate::env_audit::audit_env_vars`].
#[derive(Debug, Clone, Serialize)]
pub struct EnvVarReport {
    pub references: Vec<EnvVarReference>,
    pub missing: Vec<String>,
}

impl EnvVarReport {
    pub fn is_healthy(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Health of one declared infrastructure service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub name: String,
    pub running: bool,
    pub version: String,
    pub healthy: bool,
    pub message: String,
}

/// Aggregate result of [`crate::infra::check_infrastructure`].
#[derive(Debug, Clone, Serialize)]
pub struct InfrastructureReport {
    pub services: Vec<ServiceStatus>,
    pub is_healthy: bool,
    pub issues: Vec<String>,
    pub version_issues: Vec<Issue>,
    pub version_suggestions: Vec<Suggestion>,
}

/// Outcome of attempting one fix.
#[derive(Debug, Clone, Serialize)]
pub struct FixResult {
    pub issue_kind: String,
    pub command: String,
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

/// Aggregate result of [`crate::reconcile::reconcile`].
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub fixed: Vec<FixResult>,
    pub failed: Vec<FixResult>,
}

impl ReconciliationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.fixed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} fixed, {} failed",
            self.fixed.len(),
            self.failed.len()
        )
    }
}
