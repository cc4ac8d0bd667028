//! Core diagnostic components for the dev-environment health engine.
//!
//! This crate holds the descriptor schema and the language-agnostic
//! checkers that operate on it: detection, build-freshness verification,
//! version probing and validation, infrastructure service checks,
//! environment-variable auditing, and fix reconciliation. Every piece of
//! ecosystem-specific knowledge (which files to look for, which commands to
//! run, which versions are acceptable) lives in the YAML descriptors this
//! crate loads — none of it is hardcoded here.
//!
//! # Architecture
//!
//! envhealth-core defines:
//! - **Schema**: `EcosystemDescriptor` and friends, deserialized from YAML
//! - **Checkers**: `detector`, `freshness`, `version_probe`,
//!   `version_validate`, `infra`, `env_audit`, `reconcile`
//! - **Error Types**: unified error handling across all checkers
//!
//! # Examples
//!
//! Loading descriptors and detecting the ecosystem of a project:
//!
//! ```no_run
//! use envhealth_core::{detector, loader};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn run() -> envhealth_core::Result<()> {
//! let descriptors: Vec<Arc<_>> = loader::load_descriptors(Path::new("config"))?
//!     .into_iter()
//!     .map(Arc::new)
//!     .collect();
//! let detected = detector::detect(Path::new("."), &descriptors);
//! # Ok(())
//! # }
//! ```

pub mod detector;
pub mod env_audit;
pub mod error;
pub mod freshness;
pub mod infra;
pub mod loader;
pub mod model;
pub mod paths;
pub mod reconcile;
pub mod runner;
pub mod version_probe;
pub mod version_validate;

pub use detector::detect;
pub use env_audit::audit_env_vars;
pub use error::{EngineError, Result};
pub use freshness::verify_build_freshness;
pub use infra::check_infrastructure;
pub use loader::load_descriptors;
pub use model::{
    DescriptorFile, DetectedEcosystem, EcosystemDescriptor, EnvVarReference, EnvVarReport,
    FixResult, FreshnessReport, InfrastructureReport, Issue, IssueKind, ReconciliationReport,
    ServiceStatus, Severity, Suggestion, ValidationResult, VersionInfo,
};
pub use reconcile::reconcile;
pub use runner::{run, run_cancellable, CommandOutput};
pub use version_probe::probe;
pub use version_validate::validate;
