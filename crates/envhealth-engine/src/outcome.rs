//! The result shape returned by [`crate::dispatcher::dispatch`].
//!
//! Mirrors the tool-call boundary's "structured record or plain string"
//! contract: every variant but [`OperationOutcome::NoEcosystemsDetected`]
//! carries a JSON-encodable report; that one variant is always rendered as
//! the fixed string from §4.9.

use envhealth_core::{EnvVarReport, FreshnessReport, InfrastructureReport, ReconciliationReport};

pub const NO_ECOSYSTEMS_DETECTED: &str = "No ecosystems detected in project";

#[derive(Debug, Clone)]
pub enum OperationOutcome {
    Freshness(FreshnessReport),
    Infrastructure(InfrastructureReport),
    EnvAudit(EnvVarReport),
    Reconciliation(ReconciliationReport),
    NoEcosystemsDetected,
}

impl OperationOutcome {
    /// Encodes this outcome the way the tool-call boundary expects: the
    /// wrapped report serialized as-is, or (for the empty-detection case)
    /// the fixed plain string from §4.9 — never wrapped in an extra
    /// envelope, since callers expect the report's own shape.
    pub fn encode(&self) -> serde_json::Value {
        match self {
            OperationOutcome::Freshness(report) => serde_json::to_value(report),
            OperationOutcome::Infrastructure(report) => serde_json::to_value(report),
            OperationOutcome::EnvAudit(report) => serde_json::to_value(report),
            OperationOutcome::Reconciliation(report) => serde_json::to_value(report),
            OperationOutcome::NoEcosystemsDetected => {
                return serde_json::Value::String(NO_ECOSYSTEMS_DETECTED.to_string());
            }
        }
        .unwrap_or(serde_json::Value::Null)
    }
}
