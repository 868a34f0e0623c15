//! Run coordination for live annotations.
//!
//! Edits to a test file are turned into serialized reconciliation passes:
//! facts are requested from an external extraction engine and filed into the
//! buffer's [`wannabe_marks::MarkRegistry`] as they stream in.

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod pending;

pub use coordinator::{PassOutcome, RunCoordinator};
pub use engine::{CommandEngine, ExtractFrom, ExtractOutcome, ExtractRequest, Extraction, ExtractionEngine, FactEvent};
pub use error::{Result, RunError};
pub use pending::{DocumentSnapshot, PassRequest, PendingRuns, RunScope};
