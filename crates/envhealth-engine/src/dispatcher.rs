//! Tool Dispatcher (C11).
//!
//! Decodes a string-keyed argument bag, validates `project_root`, runs
//! detection, and routes to the operation-specific pipeline from §4.9. A
//! closed set of four operations does not justify a registry of boxed
//! handlers, so dispatch is a direct `match` on [`Operation`] — see
//! `DESIGN.md` for the tradeoff against the teacher's open registry.

use crate::engine::DiagnosticEngine;
use crate::outcome::OperationOutcome;
use envhealth_core::error::{EngineError, Result};
use envhealth_core::{detect, reconcile, verify_build_freshness};
use envhealth_core::{audit_env_vars, check_infrastructure};
use std::collections::HashMap;
use std::path::PathBuf;

/// A single tool-call's arguments: string keys, JSON-typed values.
pub type ArgBag = HashMap<String, serde_json::Value>;

/// The four operations the engine exposes at its tool-call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    VerifyBuildFreshness,
    CheckInfrastructureParity,
    EnvVarAudit,
    ReconcileEnvironment,
}

impl Operation {
    /// Parses an operation name from the tool-call boundary.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "verify_build_freshness" => Some(Self::VerifyBuildFreshness),
            "check_infrastructure_parity" => Some(Self::CheckInfrastructureParity),
            "env_var_audit" => Some(Self::EnvVarAudit),
            "reconcile_environment" => Some(Self::ReconcileEnvironment),
            _ => None,
        }
    }
}

fn require_project_root(args: &ArgBag) -> Result<PathBuf> {
    let value = args
        .get("project_root")
        .ok_or_else(|| EngineError::MissingArgument("project_root".to_string()))?;
    let raw = value.as_str().ok_or_else(|| EngineError::InvalidArgument {
        name: "project_root".to_string(),
        reason: "must be a string".to_string(),
    })?;
    let path = PathBuf::from(raw);
    if !path.is_dir() {
        return Err(EngineError::ProjectNotFound(raw.to_string()));
    }
    Ok(path)
}

/// Runs one request: `decode args → validate → detect → pipeline`.
pub async fn dispatch(
    engine: &DiagnosticEngine,
    operation: Operation,
    args: &ArgBag,
) -> Result<OperationOutcome> {
    let project_root = require_project_root(args)?;
    let detected = detect(&project_root, engine.descriptors());

    let Some(first) = detected.first() else {
        tracing::debug!(project_root = %project_root.display(), "no ecosystems detected");
        return Ok(OperationOutcome::NoEcosystemsDetected);
    };
    let descriptor = first.descriptor.as_ref();

    match operation {
        Operation::VerifyBuildFreshness => {
            let report = verify_build_freshness(descriptor, &project_root);
            Ok(OperationOutcome::Freshness(report))
        }
        Operation::CheckInfrastructureParity => {
            let report = check_infrastructure(descriptor, &project_root).await;
            Ok(OperationOutcome::Infrastructure(report))
        }
        Operation::EnvVarAudit => {
            let report = audit_env_vars(descriptor, &project_root);
            Ok(OperationOutcome::EnvAudit(report))
        }
        Operation::ReconcileEnvironment => {
            let freshness = verify_build_freshness(descriptor, &project_root);
            let report = reconcile(descriptor, &project_root, &freshness.issues).await;
            Ok(OperationOutcome::Reconciliation(report))
        }
    }
}
