//! FASTQ Validator
//!
//! Validates FASTQ files by running an external validator (`fastq_info`) and
//! turning its diagnostic stream into a structured JSON report.
//!
//! This library provides:
//! - The validation report model and its wire format
//! - Process invocation and diagnostic classification
//! - Configuration management

pub mod config;
pub mod error;
pub mod report;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use error::ExecutionError;
pub use report::{ReportBuilder, ValidationIssue, ValidationReport, ValidationState};
pub use validation::{classify_diagnostics, DiagnosticSource, Validator, ValidatorCommand};
