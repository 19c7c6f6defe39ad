//! Validation Runner
//!
//! Runs the external validator and classifies what it reports.

pub mod engine;
pub mod process;

pub use engine::{classify_diagnostics, Validator, ERROR_MARKER};
pub use process::{DiagnosticSource, ProcessSource, ToolOutput, ValidatorCommand};
