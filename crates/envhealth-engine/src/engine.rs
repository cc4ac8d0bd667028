//! Engine Facade (C12).
//!
//! Owns the descriptor registry for the process lifetime and exposes the
//! four tool-call operations to a transport. The registry is effectively
//! immutable after construction, so one `DiagnosticEngine` may be shared
//! across concurrent requests behind an `Arc` without further
//! synchronization — the same shape the teacher's LSP `Backend` uses for
//! its shared, read-mostly state.

use crate::dispatcher::{self, ArgBag, Operation};
use crate::outcome::OperationOutcome;
use envhealth_core::error::Result;
use envhealth_core::{load_descriptors, EcosystemDescriptor};
use std::path::Path;
use std::sync::Arc;

/// Holds the loaded descriptor registry and dispatches tool calls.
#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    descriptors: Arc<[Arc<EcosystemDescriptor>]>,
}

impl DiagnosticEngine {
    /// Builds an engine from an already-loaded descriptor set. Useful for
    /// tests that hand-craft a registry rather than reading from disk.
    pub fn new(descriptors: Vec<EcosystemDescriptor>) -> Self {
        let descriptors: Vec<Arc<EcosystemDescriptor>> = descriptors.into_iter().map(Arc::new).collect();
        Self {
            descriptors: descriptors.into(),
        }
    }

    /// Loads descriptors from `descriptor_root` (per the loader's
    /// discovery policy) and builds an engine from them.
    pub fn load(descriptor_root: &Path) -> Result<Self> {
        let descriptors = load_descriptors(descriptor_root)?;
        Ok(Self::new(descriptors))
    }

    pub fn descriptors(&self) -> &[Arc<EcosystemDescriptor>] {
        &self.descriptors
    }

    /// Runs one tool call end to end.
    pub async fn dispatch(&self, operation: Operation, args: &ArgBag) -> Result<OperationOutcome> {
        dispatcher::dispatch(self, operation, args).await
    }
}
