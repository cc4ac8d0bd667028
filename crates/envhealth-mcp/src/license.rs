//! License/billing gate.
//!
//! Explicitly out of scope for design effort here: a single allow-all
//! implementation stands in for whatever paid-tier check a hosted
//! deployment would perform before running an operation.

#[derive(Debug, Clone, Default)]
pub struct LicenseGate;

impl LicenseGate {
    /// Always returns `true`. A future paid check would inspect
    /// `operation` and a stored license record here.
    pub fn allow(&self, _operation: &str) -> bool {
        true
    }
}
