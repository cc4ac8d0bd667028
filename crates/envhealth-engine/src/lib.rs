//! Tool dispatcher and engine facade sitting between the diagnostic
//! components in `envhealth-core` and a transport.
//!
//! A transport constructs one [`DiagnosticEngine`], keeps it alive for the
//! process lifetime, and calls [`DiagnosticEngine::dispatch`] once per tool
//! call with a parsed [`Operation`] and an [`ArgBag`].

pub mod dispatcher;
pub mod engine;
pub mod outcome;

pub use dispatcher::{ArgBag, Operation};
pub use engine::DiagnosticEngine;
pub use outcome::{OperationOutcome, NO_ECOSYSTEMS_DETECTED};
