use thiserror::Error;

/// Error types for the diagnostic engine.
///
/// One variant per failure family named by the engine's error taxonomy:
/// configuration errors, not-found errors, argument errors, per-check
/// execution errors, command failures, and cancellation.
///
/// # Examples
///
/// ```
/// use envhealth_core::error::EngineError;
///
/// let err = EngineError::MissingArgument("project_root".into());
/// assert_eq!(err.to_string(), "missing required argument: project_root");
/// ```
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("project root not found: {0}")]
    ProjectNotFound(String),

    #[error("descriptor search root not found: {0}")]
    DescriptorRootNotFound(String),

    #[error("invalid regex in descriptor: {0}")]
    InvalidRegex(#[source] regex::Error),

    #[error("cannot parse version from probe output")]
    UnparsableVersion,

    #[error("command timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("request cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, EngineError>`, used across every
/// crate in the workspace.
pub type Result<T> = std::result::Result<T, EngineError>;
