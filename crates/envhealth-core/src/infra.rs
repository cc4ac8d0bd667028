//! Infrastructure Checker (C8).
//!
//! Probes each declared service by running its check command, extracting
//! a version where a pattern is provided. Services are probed
//! concurrently; when the descriptor also declares a version probe, the
//! Version Validator (§4.4) runs alongside and its issues/suggestions are
//! merged into the report.

use crate::model::{EcosystemDescriptor, InfrastructureReport, ServiceSpec, ServiceStatus};
use crate::runner;
use crate::{version_probe, version_validate};
use regex::Regex;
use std::path::Path;
use std::time::Duration;

const SERVICE_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

async fn check_service(service: &ServiceSpec, project_root: &Path) -> ServiceStatus {
    match runner::run(&service.check_command, project_root, SERVICE_CHECK_TIMEOUT).await {
        Ok(output) if output.succeeded() => {
            let trimmed = output.combined_output.trim();
            if trimmed.is_empty() {
                ServiceStatus {
                    name: service.name.clone(),
                    running: true,
                    version: String::new(),
                    healthy: false,
                    message: format!("{} check returned no output", service.name),
                }
            } else {
                let version = service
                    .version_pattern
                    .as_deref()
                    .and_then(|p| Regex::new(p).ok())
                    .and_then(|re| re.captures(trimmed).map(|c| c.get(1).map(|m| m.as_str().to_string())))
                    .flatten()
                    .unwrap_or_default();
                ServiceStatus {
                    name: service.name.clone(),
                    running: true,
                    version,
                    healthy: true,
                    message: String::new(),
                }
            }
        }
        Ok(output) => ServiceStatus {
            name: service.name.clone(),
            running: false,
            version: String::new(),
            healthy: false,
            message: format!("service check failed: {}", output.combined_output.trim()),
        },
        Err(e) => ServiceStatus {
            name: service.name.clone(),
            running: false,
            version: String::new(),
            healthy: false,
            message: format!("service check failed: {e}"),
        },
    }
}

/// Checks every infrastructure service declared by `descriptor`.
pub async fn check_infrastructure(
    descriptor: &EcosystemDescriptor,
    project_root: &Path,
) -> InfrastructureReport {
    let checks = descriptor
        .infrastructure
        .services
        .iter()
        .map(|service| check_service(service, project_root));
    let services: Vec<ServiceStatus> = futures::future::join_all(checks).await;

    let is_healthy = services.iter().all(|s| s.healthy);
    let issues: Vec<String> = services
        .iter()
        .filter(|s| !s.healthy)
        .map(|s| s.message.clone())
        .collect();

    let (version_issues, version_suggestions) = if descriptor.version.version_command.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        match version_probe::probe(descriptor, project_root).await {
            Ok(info) => {
                let result = version_validate::validate(descriptor, &info);
                (result.issues, result.suggestions)
            }
            Err(e) => {
                tracing::warn!(error = %e, "version probe failed during infrastructure check");
                (Vec::new(), Vec::new())
            }
        }
    };

    InfrastructureReport {
        services,
        is_healthy,
        issues,
        version_issues,
        version_suggestions,
    }
}
